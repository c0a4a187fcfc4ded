//! # dockmgr Container Command Group
//!
//! File: cli/src/commands/container.rs
//!
//! ## Overview
//!
//! Container management: list, run, start, stop, restart, remove, logs and an
//! interactive shell. As with images, every action has a clap subcommand and a
//! `prompt_*` flow for the menu. The prompt flows for actions that take an
//! existing container show the container table first so the user can copy an
//! ID or name from it.
//!
//! ## Examples
//!
//! ```bash
//! dockmgr container ls -a
//! dockmgr container run nginx:latest --name web -p 8080:80
//! dockmgr container logs web --tail 100 -f
//! dockmgr container exec web --shell /bin/sh
//! dockmgr container rm web --yes
//! ```
//!
use super::Session;
use crate::common::{
    engine::{args, args::RunSpec, Engine},
    validate,
};
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Dash count under the container table heading.
const LIST_WIDTH: usize = 100;
/// Dash count under the logs heading.
const LOGS_WIDTH: usize = 60;
/// Characters of the container ID echoed after `run`.
const SHORT_ID_LEN: usize = 12;

#[derive(Parser, Debug)]
pub struct ContainerArgs {
    #[command(subcommand)]
    command: ContainerCommand,
}

#[derive(Subcommand, Debug)]
enum ContainerCommand {
    /// List containers (running only unless --all).
    #[command(alias = "ps", alias = "list")]
    Ls {
        /// Include stopped containers.
        #[arg(short, long)]
        all: bool,
    },
    /// Run a new detached container.
    Run {
        /// Image to run.
        image: String,
        /// Container name.
        #[arg(long)]
        name: Option<String>,
        /// Port mapping, e.g. 8080:80. May be repeated.
        #[arg(short = 'p', long = "publish", value_name = "MAPPING")]
        ports: Vec<String>,
    },
    /// Start a stopped container.
    Start { container: String },
    /// Stop a running container.
    Stop { container: String },
    /// Restart a container.
    Restart { container: String },
    /// Remove a container.
    Rm {
        container: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show a container's logs.
    Logs {
        container: String,
        /// Number of trailing lines. Defaults to `containers.logs_tail`.
        #[arg(long)]
        tail: Option<u32>,
        /// Keep streaming new output.
        #[arg(short, long)]
        follow: bool,
    },
    /// Open an interactive shell in a running container.
    Exec {
        container: String,
        /// Shell to start. Defaults to `containers.exec_shell`.
        #[arg(long)]
        shell: Option<String>,
    },
}

/// The three single-identifier lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Start,
    Stop,
    Restart,
}

impl Lifecycle {
    fn args(self, id: &str) -> Vec<String> {
        match self {
            Lifecycle::Start => args::start_container(id),
            Lifecycle::Stop => args::stop_container(id),
            Lifecycle::Restart => args::restart_container(id),
        }
    }

    fn title(self) -> &'static str {
        match self {
            Lifecycle::Start => "▶️ START CONTAINER",
            Lifecycle::Stop => "⏹️ STOP CONTAINER",
            Lifecycle::Restart => "🔄 RESTART CONTAINER",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Lifecycle::Start => "start",
            Lifecycle::Stop => "stop",
            Lifecycle::Restart => "restart",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Lifecycle::Start => "started",
            Lifecycle::Stop => "stopped",
            Lifecycle::Restart => "restarted",
        }
    }
}

/// Dispatches `dockmgr container <subcommand>`.
pub async fn handle_container<E: Engine, R: BufRead, W: Write>(
    args: ContainerArgs,
    session: &mut Session<E, R, W>,
) -> Result<()> {
    debug!("Handling container command: {:?}", args.command);
    match args.command {
        ContainerCommand::Ls { all } => list(session, all).await,
        ContainerCommand::Run { image, name, ports } => {
            let spec = run_spec(&image, name.as_deref().unwrap_or(""), &ports.join(","))?;
            run(session, spec).await
        }
        ContainerCommand::Start { container } => {
            lifecycle(session, Lifecycle::Start, &container).await
        }
        ContainerCommand::Stop { container } => {
            lifecycle(session, Lifecycle::Stop, &container).await
        }
        ContainerCommand::Restart { container } => {
            lifecycle(session, Lifecycle::Restart, &container).await
        }
        ContainerCommand::Rm { container, yes } => remove(session, &container, yes).await,
        ContainerCommand::Logs {
            container,
            tail,
            follow,
        } => logs(session, &container, tail, follow).await,
        ContainerCommand::Exec { container, shell } => {
            exec(session, &container, shell.as_deref()).await
        }
    }
}

/// Validates raw `run` input into a `RunSpec`. Blank name or ports mean none.
pub fn run_spec(image: &str, name: &str, ports: &str) -> Result<RunSpec> {
    let image = validate::require_identifier(image, "Image name")?;
    let name = if name.trim().is_empty() {
        None
    } else {
        Some(validate::container_name(name)?)
    };
    let ports = validate::parse_port_list(ports)?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(RunSpec { image, name, ports })
}

/// Prints the container table.
pub async fn list<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    all: bool,
) -> Result<()> {
    let title = if all {
        "🐳 ALL CONTAINERS:"
    } else {
        "🐳 RUNNING CONTAINERS:"
    };
    session.console.heading(title, LIST_WIDTH)?;
    let table = session
        .engine
        .capture(&args::list_containers(all))
        .await
        .context("Could not list containers")?;
    if table.is_empty() {
        return Err(anyhow!(
            "Could not list containers: the engine printed nothing"
        ));
    }
    session.console.line(&table)
}

/// Starts a detached container and echoes the short ID.
pub async fn run<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    spec: RunSpec,
) -> Result<()> {
    info!("Running container from {:?}", spec);
    let id = session
        .engine
        .capture(&args::run_container(&spec))
        .await
        .with_context(|| format!("Failed to start a container from {}", spec.image))?;
    // `run -d` prints the full ID as its last line (pull progress may precede it).
    let id = id.lines().last().unwrap_or_default().trim();
    if id.is_empty() {
        return Err(anyhow!(
            "Failed to start a container from {}: the engine returned no container ID",
            spec.image
        ));
    }
    let short: String = id.chars().take(SHORT_ID_LEN).collect();
    session
        .console
        .success(&format!("Container started with ID: {}", short))
}

/// Starts, stops or restarts one container.
pub async fn lifecycle<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    action: Lifecycle,
    container: &str,
) -> Result<()> {
    let id = validate::require_identifier(container, "Container ID")?;
    session
        .engine
        .capture(&action.args(&id))
        .await
        .with_context(|| format!("Failed to {} container {}", action.verb(), id))?;
    session
        .console
        .success(&format!("Container {} {}", id, action.past()))
}

/// Removes a container after confirmation (skipped when `assume_yes`).
pub async fn remove<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    container: &str,
    assume_yes: bool,
) -> Result<()> {
    let id = validate::require_identifier(container, "Container ID")?;
    if !assume_yes
        && !session
            .console
            .confirm(&format!("Are you sure you want to remove container {}?", id))?
    {
        return session.console.line("Removal cancelled.");
    }
    let force = session.config.containers.force_remove;
    session
        .engine
        .capture(&args::remove_container(&id, force))
        .await
        .with_context(|| format!("Failed to remove container {}", id))?;
    session
        .console
        .success(&format!("Container {} removed", id))
}

/// Streams a container's logs.
///
/// # Arguments
///
/// * `container` - Container ID or name.
/// * `tail` - Trailing lines to show; `None` uses `containers.logs_tail`.
/// * `follow` - Keep streaming until the engine exits or Ctrl-C is pressed.
pub async fn logs<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    container: &str,
    tail: Option<u32>,
    follow: bool,
) -> Result<()> {
    let id = validate::require_identifier(container, "Container ID")?;
    let tail = tail.unwrap_or(session.config.containers.logs_tail);
    session
        .console
        .heading(&format!("📋 Logs for container {}:", id), LOGS_WIDTH)?;
    session.console.flush()?;
    session
        .engine
        .attach(&args::container_logs(&id, tail, follow))
        .await
        .with_context(|| format!("Failed to read logs of container {}", id))
}

/// Opens an interactive shell (`containers.exec_shell` unless `shell` is
/// given) in a running container.
pub async fn exec<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    container: &str,
    shell: Option<&str>,
) -> Result<()> {
    let id = validate::require_identifier(container, "Container ID")?;
    let shell = match shell {
        Some(s) => validate::require(s, "Shell")?,
        None => session.config.containers.exec_shell.clone(),
    };
    session
        .console
        .line("Starting interactive shell in the container...")?;
    session.console.flush()?;
    session
        .engine
        .attach(&args::exec_shell(&id, &shell))
        .await
        .with_context(|| format!("Shell session in container {} failed", id))
}

/// Menu flow: asks for image, optional name and optional port mappings,
/// validates all three, then runs the container.
pub async fn prompt_run<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    session.console.line("\n🚀 RUN CONTAINER")?;
    let image = session.console.ask("Image name")?;
    let name = session.console.ask("Container name (optional)")?;
    let ports = session
        .console
        .ask("Port mappings (e.g. 8080:80, optional)")?;
    let spec = run_spec(&image, &name, &ports)?;
    run(session, spec).await
}

/// Shows the table, then asks which container to act on.
async fn pick<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    running_only: bool,
    title: &str,
    label: &str,
) -> Result<String> {
    if let Err(e) = list(session, !running_only).await {
        session.preview_failed(e)?;
    }
    session.console.line(&format!("\n{}", title))?;
    session.console.ask(label)
}

/// Menu flow for start, stop and restart: shows all containers, then asks
/// which one to act on.
pub async fn prompt_lifecycle<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
    action: Lifecycle,
) -> Result<()> {
    let label = format!("ID or name of the container to {}", action.verb());
    let id = pick(session, false, action.title(), &label).await?;
    lifecycle(session, action, &id).await
}

/// Menu flow: shows all containers, asks which to remove and confirms.
pub async fn prompt_remove<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    let id = pick(
        session,
        false,
        "🗑️ REMOVE CONTAINER",
        "ID or name of the container to remove",
    )
    .await?;
    remove(session, &id, false).await
}

/// Menu flow: shows all containers, then streams the chosen one's logs.
pub async fn prompt_logs<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    let id = pick(session, false, "📋 VIEW LOGS", "Container ID or name").await?;
    logs(session, &id, None, false).await
}

/// Menu flow: shows running containers only, since exec needs one.
pub async fn prompt_exec<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    let id = pick(
        session,
        true,
        "💻 OPEN SHELL IN CONTAINER",
        "Container ID or name",
    )
    .await?;
    exec(session, &id, None).await
}
