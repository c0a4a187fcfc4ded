//! # dockmgr Image Command Group
//!
//! File: cli/src/commands/image.rs
//!
//! ## Overview
//!
//! Image management: list, pull, build, remove. Each action is available as a
//! `dockmgr image <subcommand>` and as a prompt flow for the interactive menu
//! (`prompt_*` functions), both ending in one engine invocation.
//!
//! ## Examples
//!
//! ```bash
//! dockmgr image list
//! dockmgr image pull nginx:latest
//! dockmgr image build -t myapp:dev ./app
//! dockmgr image rm myapp:dev --yes
//! ```
//!
use super::Session;
use crate::common::{
    engine::{args, Engine},
    validate,
};
use crate::core::error::{DockmgrError, Result};
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// Dash count under the image table heading.
const LIST_WIDTH: usize = 80;

#[derive(Parser, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    command: ImageCommand,
}

#[derive(Subcommand, Debug)]
enum ImageCommand {
    /// List all local images.
    #[command(alias = "ls")]
    List,
    /// Pull an image from its registry.
    Pull {
        /// Image reference, e.g. nginx:latest.
        image: String,
    },
    /// Build an image from a directory containing a Dockerfile.
    Build {
        /// Name (and optional tag) for the new image.
        #[arg(short, long)]
        tag: String,
        /// Build context directory. Defaults to `images.build_context`.
        context: Option<String>,
    },
    /// Remove an image.
    #[command(alias = "rmi")]
    Rm {
        /// Image ID or reference.
        image: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
        /// Remove even if containers still reference it.
        #[arg(short, long)]
        force: bool,
    },
}

/// Dispatches `dockmgr image <subcommand>`.
pub async fn handle_image<E: Engine, R: BufRead, W: Write>(
    args: ImageArgs,
    session: &mut Session<E, R, W>,
) -> Result<()> {
    debug!("Handling image command: {:?}", args.command);
    match args.command {
        ImageCommand::List => list(session).await,
        ImageCommand::Pull { image } => pull(session, &image).await,
        ImageCommand::Build { tag, context } => build(session, &tag, context.as_deref()).await,
        ImageCommand::Rm { image, yes, force } => remove(session, &image, force, yes).await,
    }
}

/// Prints the image table.
pub async fn list<E: Engine, R: BufRead, W: Write>(session: &mut Session<E, R, W>) -> Result<()> {
    session
        .console
        .heading("📦 AVAILABLE IMAGES:", LIST_WIDTH)?;
    let table = session
        .engine
        .capture(&args::list_images())
        .await
        .context("Could not list images")?;
    if table.is_empty() {
        return Err(anyhow!("Could not list images: the engine printed nothing"));
    }
    session.console.line(&table)
}

/// Pulls `image`, streaming the engine's progress output.
///
/// # Errors
///
/// * `DockmgrError::InvalidInput` - If the name is empty or starts with `-`.
/// * `DockmgrError::EngineCommand` - If the pull fails.
pub async fn pull<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    image: &str,
) -> Result<()> {
    let image = validate::require_identifier(image, "Image name")?;
    info!("Pulling image {}", image);
    session
        .console
        .line(&format!("Pulling image: {}...", image))?;
    session.console.flush()?;
    session
        .engine
        .attach(&args::pull_image(&image))
        .await
        .with_context(|| format!("Failed to pull image {}", image))?;
    session
        .console
        .success(&format!("Image {} pulled successfully", image))
}

/// Builds `tag` from `context`, which must contain a `Dockerfile`.
pub async fn build<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    tag: &str,
    context: Option<&str>,
) -> Result<()> {
    let tag = validate::require_identifier(tag, "Image name")?;
    let context = match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(dir) => dir.to_string(),
        None => session.config.images.build_context.clone(),
    };
    // Passed as a bare positional, so `-x` would be read as an option.
    let context = validate::require_identifier(&context, "Build context")?;

    if !Path::new(&context).join("Dockerfile").is_file() {
        return Err(DockmgrError::DockerfileNotFound { dir: context }.into());
    }

    info!("Building image {} from {}", tag, context);
    session
        .console
        .line(&format!("Building image {}...", tag))?;
    session.console.flush()?;
    session
        .engine
        .attach(&args::build_image(&tag, &context))
        .await
        .with_context(|| format!("Failed to build image {}", tag))?;
    session
        .console
        .success(&format!("Image {} built successfully", tag))
}

/// Removes an image after confirmation (skipped when `assume_yes`).
pub async fn remove<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    image: &str,
    force: bool,
    assume_yes: bool,
) -> Result<()> {
    let image = validate::require_identifier(image, "Image ID")?;
    if !assume_yes
        && !session
            .console
            .confirm(&format!("Are you sure you want to remove image {}?", image))?
    {
        return session.console.line("Removal cancelled.");
    }

    session
        .engine
        .capture(&args::remove_image(&image, force))
        .await
        .with_context(|| format!("Failed to remove image {}", image))?;
    session
        .console
        .success(&format!("Image {} removed successfully", image))
}

/// Menu flow: asks for an image name, then pulls it.
pub async fn prompt_pull<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    session.console.line("\n⬇️ PULL IMAGE")?;
    let image = session.console.ask("Image name (e.g. nginx:latest)")?;
    pull(session, &image).await
}

/// Menu flow: asks for the build context (blank keeps the configured one)
/// and the image name, then builds.
pub async fn prompt_build<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    session.console.line("\n🔨 BUILD IMAGE")?;
    let label = format!(
        "Directory containing the Dockerfile (empty for {})",
        session.config.images.build_context
    );
    let context = session.console.ask(&label)?;
    let tag = session.console.ask("Name for the new image")?;
    build(session, &tag, Some(&context)).await
}

/// Menu flow: shows the image table, asks which image to remove, then
/// confirms before removing it.
pub async fn prompt_remove<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    if let Err(e) = list(session).await {
        session.preview_failed(e)?;
    }
    session.console.line("\n🗑️ REMOVE IMAGE")?;
    let image = session
        .console
        .ask("ID or name of the image to remove")?;
    remove(session, &image, false, false).await
}
