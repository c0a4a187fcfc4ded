//! # dockmgr Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the dockmgr CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and checking that the container engine is usable
//! - Routing execution to the interactive menu or a direct subcommand
//!
//! ## Examples
//!
//! ```bash
//! # Interactive menu (the default)
//! dockmgr
//!
//! # Same menu, driving podman instead of docker
//! dockmgr --engine podman
//!
//! # Direct subcommands with debug logging
//! dockmgr -vv container ls --all
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and probe `<engine> --version`
//! 4. Run the menu or the chosen subcommand
//! 5. Format and display any errors that occur
//!
//! Ctrl-C at any point prints a goodbye line and exits with status 130.
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Menu and per-group command handlers.
mod common; // Engine, process, UI and validation utilities.
mod core; // Configuration and errors.

use crate::common::engine::{CliEngine, Engine};
use crate::common::ui::Console;
use crate::core::config::{self, Overrides};
use crate::core::error::Result;
use commands::Session;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "dockmgr",
    about = "🐳 dockmgr: menu-driven management of images and containers",
    long_about = "Manage images and containers through an interactive menu, or run a single \
                  action directly. Every action shells out to the docker (or compatible) CLI.",
    propagate_version = true,
    version
)]
struct Cli {
    /// Action to run. Without one, the interactive menu starts.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Container-engine binary to invoke instead of the configured one.
    #[arg(long, env = "DOCKMGR_ENGINE", global = true, value_name = "BINARY")]
    engine: Option<String>,
    /// Read configuration from this file only.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive menu.
    Menu,
    #[command(alias = "i")]
    Image(commands::image::ImageArgs),
    #[command(alias = "c")]
    Container(commands::container::ContainerArgs),
    #[command(alias = "s")]
    System(commands::system::SystemArgs),
}

/// Exit status after Ctrl-C (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

// Prompts block the main thread on stdin, so the Ctrl-C watcher needs a
// worker thread of its own.
#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);
    spawn_interrupt_watcher();

    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Ends the program with a goodbye line when Ctrl-C is pressed, at a prompt
/// or while an attached engine command is running.
fn spawn_interrupt_watcher() {
    tokio::spawn(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received Ctrl+C, exiting");
                println!("\n\n👋 Interrupted, exiting.");
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
            Err(e) => tracing::warn!("Failed to install Ctrl+C handler: {}", e),
        }
    });
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(&Overrides {
        config_file: cli.config,
        engine: cli.engine,
    })?;

    let engine = CliEngine::new(&config.engine.binary);
    let version = engine.version().await?;
    tracing::info!("Container engine detected: {}", version);

    let mut session = Session::new(engine, Console::stdio(), config);
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            session
                .console
                .success(&format!("Container engine detected: {}", version))?;
            commands::menu::run_menu(&mut session).await
        }
        Commands::Image(args) => commands::image::handle_image(args, &mut session).await,
        Commands::Container(args) => {
            commands::container::handle_container(args, &mut session).await
        }
        Commands::System(args) => commands::system::handle_system(args, &mut session).await,
    }
}
