//! # dockmgr Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout dockmgr. Nearly every
//! failure the tool can report originates in the external container engine,
//! so the taxonomy is deliberately small:
//!
//! - `DockmgrError`: a `thiserror` enum for the conditions callers match on
//! - `Result<T>`: an alias for `anyhow::Result<T>` so context can be attached
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if value.is_empty() {
//!     return Err(DockmgrError::InvalidInput("Image name cannot be empty".into()).into());
//! }
//!
//! // Inspect an error coming back from an action
//! match result {
//!     Err(e) if e.downcast_ref::<DockmgrError>().is_some_and(|de| matches!(de, DockmgrError::InputClosed)) => {
//!         // stdin is gone, leave the menu loop
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for dockmgr.
#[derive(Error, Debug)]
pub enum DockmgrError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The engine binary could not be executed at all (missing from PATH,
    /// not executable, or `--version` failed).
    #[error("Container engine '{binary}' is not installed or not on the PATH ({reason})")]
    EngineUnavailable { binary: String, reason: String },

    /// The engine ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}){}", stderr_suffix(.stderr))]
    EngineCommand {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid port mapping '{mapping}': {reason}")]
    InvalidPortMapping { mapping: String, reason: String },

    #[error("Dockerfile not found in {dir}")]
    DockerfileNotFound { dir: String },

    /// Standard input reached end-of-file while a prompt was waiting.
    #[error("Input closed")]
    InputClosed,
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

impl DockmgrError {
    /// True when the given error chain bottoms out in `InputClosed`.
    pub fn is_input_closed(err: &anyhow::Error) -> bool {
        err.downcast_ref::<DockmgrError>()
            .is_some_and(|de| matches!(de, DockmgrError::InputClosed))
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_display() {
        let config_err = DockmgrError::Config("logs_tail must be at least 1".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: logs_tail must be at least 1"
        );

        let missing = DockmgrError::EngineUnavailable {
            binary: "podman".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(
            missing.to_string(),
            "Container engine 'podman' is not installed or not on the PATH (No such file or directory)"
        );

        let dockerfile = DockmgrError::DockerfileNotFound { dir: "./app".into() };
        assert_eq!(dockerfile.to_string(), "Dockerfile not found in ./app");
    }

    #[test]
    fn test_engine_command_display_with_and_without_stderr() {
        let with_stderr = DockmgrError::EngineCommand {
            command: "docker rmi ghost".into(),
            status: "exit status: 1".into(),
            stderr: "Error: No such image: ghost".into(),
        };
        assert_eq!(
            with_stderr.to_string(),
            "`docker rmi ghost` failed (exit status: 1): Error: No such image: ghost"
        );

        let attached = DockmgrError::EngineCommand {
            command: "docker pull nope".into(),
            status: "exit status: 1".into(),
            stderr: String::new(),
        };
        assert_eq!(
            attached.to_string(),
            "`docker pull nope` failed (exit status: 1)"
        );
    }

    #[test]
    fn test_is_input_closed_survives_context() {
        let err: anyhow::Error = Err::<(), _>(DockmgrError::InputClosed)
            .context("Reading menu choice")
            .unwrap_err();
        assert!(DockmgrError::is_input_closed(&err));

        let other = anyhow::Error::new(DockmgrError::InvalidInput("nope".into()));
        assert!(!DockmgrError::is_input_closed(&other));
    }
}
