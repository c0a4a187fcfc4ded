//! # dockmgr Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers in `commands::`:
//!
//! - **`engine`**: the `Engine` trait, the `CliEngine` that shells out to the
//!   configured container-engine binary, and the per-action argument lists.
//! - **`process`**: spawning child processes in captured or attached mode.
//! - **`ui`**: console prompts and the menu screens.
//! - **`validate`**: checks on user-typed names, identifiers and port mappings.
//!
//! ```rust
//! use crate::common::{engine::{args, Engine}, validate};
//!
//! # async fn run_example(engine: &impl Engine) -> crate::core::error::Result<()> {
//! let image = validate::require_identifier("nginx:latest", "Image name")?;
//! engine.attach(&args::pull_image(&image)).await?;
//! # Ok(())
//! # }
//! ```
//!

/// The container-engine seam and its CLI-backed implementation.
pub mod engine;
/// Captured and attached child-process execution.
pub mod process;
/// Console prompts and menu definitions.
pub mod ui;
/// Validation of user-provided strings.
pub mod validate;
