//! # dockmgr Container Engine Interface (`common::engine`)
//!
//! File: cli/src/common/engine/mod.rs
//!
//! ## Overview
//!
//! Every action dockmgr offers ends in exactly one invocation of an external
//! container-engine CLI. This module is the seam between the actions and
//! that binary:
//!
//! - **`Engine`**: the trait the command handlers are written against.
//! - **`CliEngine`**: the production implementation. It spawns the configured
//!   binary (`docker` by default) through `common::process`.
//! - **`args`**: the argument vector for each action.
//!
//! Exit status is the whole error model: zero is success, anything else is
//! turned into `DockmgrError::EngineCommand` carrying the engine's stderr.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::engine::{args, CliEngine, Engine};
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let engine = CliEngine::new("docker");
//! println!("{}", engine.version().await?);
//! let table = engine.capture(&args::list_images()).await?;
//! println!("{}", table);
//! engine.attach(&args::pull_image("nginx:latest")).await?;
//! # Ok(())
//! # }
//! ```
//!
pub mod args;

use crate::common::process;
use crate::core::error::{DockmgrError, Result};
use anyhow::anyhow;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Operations every engine backend must provide.
#[allow(async_fn_in_trait)] // Only used through generics inside this crate.
pub trait Engine {
    /// Name shown to the user (the configured binary).
    fn binary(&self) -> &str;

    /// Runs the engine with captured output; returns trimmed stdout.
    async fn capture(&self, args: &[String]) -> Result<String>;

    /// Runs the engine attached to the terminal.
    async fn attach(&self, args: &[String]) -> Result<()>;

    /// Reports the engine version, failing if the binary is unusable.
    async fn version(&self) -> Result<String> {
        self.capture(&args::version()).await.map_err(|e| {
            if e.downcast_ref::<DockmgrError>()
                .is_some_and(|de| matches!(de, DockmgrError::EngineUnavailable { .. }))
            {
                e
            } else {
                anyhow!(DockmgrError::EngineUnavailable {
                    binary: self.binary().to_string(),
                    reason: e.to_string(),
                })
            }
        })
    }
}

/// Engine backed by an external CLI binary.
#[derive(Debug, Clone)]
pub struct CliEngine {
    binary: PathBuf,
    display: String,
}

impl CliEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        let display = binary.display().to_string();
        Self { binary, display }
    }
}

impl Engine for CliEngine {
    fn binary(&self) -> &str {
        &self.display
    }

    async fn capture(&self, args: &[String]) -> Result<String> {
        let output = process::run_capture(&self.binary, args).await?;
        if output.status.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            let stderr = output.stderr.trim().to_string();
            warn!(
                "{} exited with {}: {}",
                process::describe(&self.binary, args),
                output.status,
                stderr
            );
            Err(anyhow!(DockmgrError::EngineCommand {
                command: process::describe(&self.binary, args),
                status: output.status.to_string(),
                stderr,
            }))
        }
    }

    async fn attach(&self, args: &[String]) -> Result<()> {
        let status = process::run_attached(&self.binary, args).await?;
        if status.success() {
            debug!("{} completed", process::describe(&self.binary, args));
            Ok(())
        } else {
            Err(anyhow!(DockmgrError::EngineCommand {
                command: process::describe(&self.binary, args),
                status: status.to_string(),
                stderr: String::new(),
            }))
        }
    }
}
