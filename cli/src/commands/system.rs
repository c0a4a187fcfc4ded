//! # dockmgr System Command Group
//!
//! File: cli/src/commands/system.rs
//!
//! Engine-wide actions: `system info`, `system df` and a full `system prune`.
//! Output of all three is streamed straight from the engine.
//!
use super::Session;
use crate::common::engine::{args, Engine};
use crate::core::error::Result;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const INFO_WIDTH: usize = 50;
const DF_WIDTH: usize = 40;

/// What `system prune -a -f` deletes, shown before asking.
const CLEANUP_SCOPE: &[&str] = &[
    "- Stopped containers",
    "- Unused networks",
    "- Images not used by any container",
    "- Build cache",
];

#[derive(Parser, Debug)]
pub struct SystemArgs {
    #[command(subcommand)]
    command: SystemCommand,
}

#[derive(Subcommand, Debug)]
enum SystemCommand {
    /// Show engine-wide information.
    Info,
    /// Show disk usage.
    Df,
    /// Remove all unused containers, networks, images and build cache.
    Prune {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Dispatches `dockmgr system <subcommand>`.
pub async fn handle_system<E: Engine, R: BufRead, W: Write>(
    args: SystemArgs,
    session: &mut Session<E, R, W>,
) -> Result<()> {
    debug!("Handling system command: {:?}", args.command);
    match args.command {
        SystemCommand::Info => show_info(session).await,
        SystemCommand::Df => disk_usage(session).await,
        SystemCommand::Prune { yes } => cleanup(session, yes).await,
    }
}

/// Streams `system info` under a heading.
pub async fn show_info<E: Engine, R: BufRead, W: Write>(session: &mut Session<E, R, W>) -> Result<()> {
    session
        .console
        .heading("🔧 ENGINE SYSTEM INFORMATION:", INFO_WIDTH)?;
    session.console.flush()?;
    session
        .engine
        .attach(&args::system_info())
        .await
        .context("Failed to read engine information")
}

/// Streams `system df` under a heading.
pub async fn disk_usage<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    session.console.heading("💾 ENGINE DISK USAGE:", DF_WIDTH)?;
    session.console.flush()?;
    session
        .engine
        .attach(&args::disk_usage())
        .await
        .context("Failed to read disk usage")
}

/// Prunes everything unused, after confirmation unless `assume_yes`.
pub async fn cleanup<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    assume_yes: bool,
) -> Result<()> {
    session.console.line("\n🧹 SYSTEM CLEANUP")?;
    session.console.line("This will remove:")?;
    for item in CLEANUP_SCOPE {
        session.console.line(item)?;
    }
    if !assume_yes && !session.console.confirm("\nContinue with the cleanup?")? {
        return session.console.line("Cleanup cancelled.");
    }

    info!("Pruning unused engine resources");
    session.console.flush()?;
    session
        .engine
        .attach(&args::system_prune())
        .await
        .context("Error during cleanup")?;
    session.console.success("Cleanup completed")
}
