//! # dockmgr CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Besides locating
//! the compiled `dockmgr` binary, this provides `FakeEngine`: a small shell
//! script standing in for the docker CLI. It appends every invocation to a log
//! file and answers a handful of subcommands with canned output, so tests can
//! assert on exactly which arguments dockmgr forwarded.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `assert_cmd::Command` for the `dockmgr` binary under test.
pub fn dockmgr_cmd() -> Command {
    Command::cargo_bin("dockmgr").expect("Failed to find dockmgr binary for testing")
}

const FAKE_ENGINE_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_ENGINE_LOG"
case "$1" in
  --version) echo "Docker version 27.0.0, build fake" ;;
  images) printf 'REPOSITORY   TAG      IMAGE ID\nnginx        latest   abc123\n' ;;
  ps) echo "CONTAINER ID   NAMES" ;;
  run) echo "0123456789abcdef0123456789abcdef" ;;
  rmi) echo "Error response from daemon: No such image: $2" >&2; exit 1 ;;
esac
exit 0
"#;

/// A throwaway working directory holding a fake engine, its call log and an
/// empty config file.
pub struct FakeEngine {
    dir: TempDir,
    engine: PathBuf,
    log: PathBuf,
    config: PathBuf,
}

impl FakeEngine {
    #[cfg(unix)]
    pub fn new() -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let engine = dir.path().join("fake-docker");
        fs::write(&engine, FAKE_ENGINE_SCRIPT).expect("Failed to write fake engine");
        fs::set_permissions(&engine, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake engine executable");

        let log = dir.path().join("calls.log");
        fs::write(&log, "").expect("Failed to create call log");
        let config = dir.path().join("dockmgr.toml");
        fs::write(&config, "").expect("Failed to write config");

        Self {
            dir,
            engine,
            log,
            config,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Replaces the config file contents.
    pub fn with_config(self, toml: &str) -> Self {
        fs::write(&self.config, toml).expect("Failed to write config");
        self
    }

    /// `dockmgr` pointed at the fake engine, isolated from user config.
    pub fn cmd(&self) -> Command {
        Command::from_std(self.std_cmd())
    }

    /// Same as `cmd`, as a plain `std::process::Command` for tests that need
    /// to spawn the binary and interact with it while it runs.
    pub fn std_cmd(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("dockmgr"));
        cmd.current_dir(self.dir.path())
            .env("FAKE_ENGINE_LOG", &self.log)
            .env_remove("DOCKMGR_ENGINE")
            .env_remove("RUST_LOG")
            .arg("--engine")
            .arg(&self.engine)
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    /// Every recorded invocation, one argument string per line.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .expect("Failed to read call log")
            .lines()
            .map(str::to_string)
            .collect()
    }
}
