//! # dockmgr Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates dockmgr's configuration. Nothing in
//! the configuration is required: every field has a default that reproduces
//! the stock behaviour (the `docker` binary, 50 lines of logs, `/bin/bash`
//! for exec, and so on).
//!
//! Configuration sources (in order of precedence):
//! 1. `--engine` flag or `DOCKMGR_ENGINE` (engine binary only)
//! 2. Project-specific `.dockmgr.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/dockmgr/config.toml`
//! 4. Default values defined in the code
//!
//! An explicit `--config <FILE>` replaces sources 2 and 3.
//!
//! ## Examples
//!
//! ```toml
//! [engine]
//! binary = "podman"
//!
//! [containers]
//! logs_tail = 200
//! exec_shell = "/bin/sh"
//!
//! [ui]
//! pause_after_action = false
//! ```
//!
use crate::core::error::{DockmgrError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use toml::{Table, Value};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub containers: ContainersConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Which container-engine CLI to shell out to.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Binary name (looked up on PATH) or path (can use ~).
    #[serde(default = "default_engine_binary")]
    pub binary: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Build context offered when the build prompt is left empty.
    #[serde(default = "default_build_context")]
    pub build_context: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ContainersConfig {
    /// Number of trailing log lines shown by the logs action.
    #[serde(default = "default_logs_tail")]
    pub logs_tail: u32,
    /// Shell started by the exec action.
    #[serde(default = "default_exec_shell")]
    pub exec_shell: String,
    /// Remove containers with `rm -f` so running ones go too.
    #[serde(default = "default_true")]
    pub force_remove: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Clear the terminal before drawing the main menu.
    #[serde(default)]
    pub clear_screen: bool,
    /// Wait for Enter after each submenu action.
    #[serde(default = "default_true")]
    pub pause_after_action: bool,
}

fn default_engine_binary() -> String {
    "docker".to_string()
}
fn default_build_context() -> String {
    ".".to_string()
}
fn default_logs_tail() -> u32 {
    50
}
fn default_exec_shell() -> String {
    "/bin/bash".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_engine_binary(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            build_context: default_build_context(),
        }
    }
}

impl Default for ContainersConfig {
    fn default() -> Self {
        Self {
            logs_tail: default_logs_tail(),
            exec_shell: default_exec_shell(),
            force_remove: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            clear_screen: false,
            pause_after_action: true,
        }
    }
}

/// Values supplied on the command line that take precedence over files.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Replaces the user/project config files when set.
    pub config_file: Option<PathBuf>,
    /// Replaces `engine.binary` when set.
    pub engine: Option<String>,
}

const PROJECT_CONFIG_FILENAME: &str = ".dockmgr.toml";

/// Loads the effective configuration for this run.
pub fn load_config(overrides: &Overrides) -> Result<Config> {
    let layers = match &overrides.config_file {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            vec![load_layer(path)?]
        }
        None => load_user_layer()?
            .into_iter()
            .chain(load_project_layer()?)
            .collect(),
    };
    let mut config = merge_layers(layers)?;
    apply_overrides(&mut config, overrides);
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_layer() -> Result<Option<Table>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "dockmgr") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_layer(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_layer() -> Result<Option<Table>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", path.display());
        load_layer(&path).map(Some)
    } else {
        debug!("No project configuration file (.dockmgr.toml) found.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.dockmgr.toml`, stopping at the first
/// directory that holds a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Reads one config file as a raw table, keeping only the keys it sets.
///
/// The table is also checked against `Config` here so that unknown keys and
/// wrong types are reported against the file they came from.
fn load_layer(path: &Path) -> Result<Table> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let table: Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    Value::Table(table.clone())
        .try_into::<Config>()
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))?;
    Ok(table)
}

/// Overlays the layers in order (later wins, key by key) and fills the
/// remaining fields with defaults.
fn merge_layers(layers: Vec<Table>) -> Result<Config> {
    let mut merged = Table::new();
    for layer in layers {
        overlay(&mut merged, layer);
    }
    Value::Table(merged)
        .try_into()
        .context("Failed to combine configuration files")
}

fn overlay(base: &mut Table, layer: Table) {
    for (key, value) in layer {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(section)) => overlay(existing, section),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(engine) = &overrides.engine {
        debug!("Engine binary overridden on command line: {}", engine);
        config.engine.binary = engine.clone();
    }
}

fn expand_config_paths(config: &mut Config) {
    config.engine.binary = shellexpand::tilde(&config.engine.binary).into_owned();
    config.images.build_context = shellexpand::tilde(&config.images.build_context).into_owned();
    debug!(
        "Expanded engine binary: {}, build context: {}",
        config.engine.binary, config.images.build_context
    );
}

fn validate_config(config: &Config) -> Result<()> {
    if config.engine.binary.trim().is_empty() {
        return Err(anyhow!(DockmgrError::Config(
            "engine.binary cannot be empty".to_string()
        )));
    }
    if config.containers.exec_shell.trim().is_empty() {
        return Err(anyhow!(DockmgrError::Config(
            "containers.exec_shell cannot be empty".to_string()
        )));
    }
    if config.containers.logs_tail == 0 {
        return Err(anyhow!(DockmgrError::Config(
            "containers.logs_tail must be at least 1".to_string()
        )));
    }
    if config.images.build_context.trim().is_empty() {
        return Err(anyhow!(DockmgrError::Config(
            "images.build_context cannot be empty".to_string()
        )));
    }
    Ok(())
}
