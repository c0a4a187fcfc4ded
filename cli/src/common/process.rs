//! # dockmgr Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Thin wrappers around `tokio::process::Command` for the two ways dockmgr
//! runs the container engine:
//!
//! - **Captured** (`run_capture`): stdout and stderr are collected as text so
//!   the caller can print or reformat them (image tables, the new container ID).
//! - **Attached** (`run_attached`): the child inherits the terminal, so pull
//!   progress, build output and log streams appear live and `exec -it` gets a
//!   real TTY.
//!
//! A missing binary is reported as `DockmgrError::EngineUnavailable`; the
//! exit status itself is returned to the caller to interpret.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//! use std::path::Path;
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let args = vec!["ps".to_string(), "-a".to_string()];
//! let output = process::run_capture(Path::new("docker"), &args).await?;
//! if output.status.success() {
//!     println!("{}", output.stdout);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{DockmgrError, Result};
use anyhow::{anyhow, Context};
use std::{
    io,
    path::Path,
    process::{ExitStatus, Stdio},
};
use tokio::process::Command;
use tracing::{debug, instrument};

/// Output of a captured child process.
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Renders `program args...` for logs and error messages.
pub fn describe(program: &Path, args: &[String]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            rendered.push_str(&format!("{:?}", arg));
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}

/// Runs the program to completion, capturing stdout and stderr.
#[instrument(skip_all, fields(cmd = %describe(program, args)))]
pub async fn run_capture(program: &Path, args: &[String]) -> Result<CapturedOutput> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| spawn_error(program, e))?;

    let captured = CapturedOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(
        "status={}, stdout={} bytes, stderr={} bytes",
        captured.status,
        captured.stdout.len(),
        captured.stderr.len()
    );
    Ok(captured)
}

/// Runs the program with the terminal's stdin/stdout/stderr.
#[instrument(skip_all, fields(cmd = %describe(program, args)))]
pub async fn run_attached(program: &Path, args: &[String]) -> Result<ExitStatus> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| spawn_error(program, e))?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed waiting for {}", program.display()))?;
    debug!("status={}", status);
    Ok(status)
}

fn spawn_error(program: &Path, err: io::Error) -> anyhow::Error {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            anyhow!(DockmgrError::EngineUnavailable {
                binary: program.display().to_string(),
                reason: err.to_string(),
            })
        }
        _ => anyhow!(err).context(format!("Failed to execute {}", program.display())),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_describe_quotes_whitespace() {
        let args = strings(&["images", "--format", "table {{.ID}}"]);
        assert_eq!(
            describe(Path::new("docker"), &args),
            "docker images --format \"table {{.ID}}\""
        );
        assert_eq!(describe(Path::new("podman"), &[]), "podman");
    }

    #[tokio::test]
    async fn test_missing_binary_is_engine_unavailable() {
        let err = run_capture(Path::new("dockmgr-no-such-binary-4242"), &[])
            .await
            .unwrap_err();
        assert!(err
            .downcast_ref::<DockmgrError>()
            .is_some_and(|de| matches!(de, DockmgrError::EngineUnavailable { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_capture_collects_streams() {
        let args = strings(&["-c", "echo out; echo err >&2; exit 3"]);
        let output = run_capture(Path::new("sh"), &args).await.unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_attached_reports_status() {
        let ok = run_attached(Path::new("true"), &[]).await.unwrap();
        assert!(ok.success());
        let failed = run_attached(Path::new("false"), &[]).await.unwrap();
        assert!(!failed.success());
    }
}
