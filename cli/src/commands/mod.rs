//! # dockmgr Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the command groups of the dockmgr CLI. Each group
//! offers the same actions two ways: as clap subcommands
//! (`dockmgr image pull nginx`) and as prompt-driven flows used by the
//! interactive menu.
//!
//! ## Command Groups
//!
//! - `image`: list, pull, build and remove images
//! - `container`: list, run, start, stop, restart, remove, logs, exec
//! - `system`: engine info, disk usage, cleanup
//! - `menu`: the interactive loop tying the groups together
//!
//! All handlers take a `Session`, which bundles the engine, the console and
//! the loaded configuration.
//!
use crate::common::engine::Engine;
use crate::common::ui::Console;
use crate::core::config::Config;
use crate::core::error::{DockmgrError, Result};
use std::io::{BufRead, Write};
use tracing::warn;

/// Container lifecycle commands (`run`, `stop`, `logs`, `exec`, ...).
pub mod container;
/// Image commands (`list`, `pull`, `build`, `rm`).
pub mod image;
/// The interactive menu loop.
pub mod menu;
/// Engine-wide commands (`info`, `df`, `prune`).
pub mod system;

/// Everything an action needs: the engine to call, where to talk to the
/// user, and the effective configuration.
pub struct Session<E, R, W> {
    pub engine: E,
    pub console: Console<R, W>,
    pub config: Config,
}

impl<E: Engine, R: BufRead, W: Write> Session<E, R, W> {
    pub fn new(engine: E, console: Console<R, W>, config: Config) -> Self {
        Self {
            engine,
            console,
            config,
        }
    }

    /// Prints a listing failure without aborting the surrounding flow.
    ///
    /// Used where a table is only shown as a reference before a prompt.
    pub(crate) fn preview_failed(&mut self, err: anyhow::Error) -> Result<()> {
        warn!("Listing before prompt failed: {:?}", err);
        self.console.failure(&format!("{:#}", err))
    }

    /// Prints an action's error and swallows it, except for closed input,
    /// which has to end the menu loop.
    pub(crate) fn report(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) if DockmgrError::is_input_closed(&e) => Err(e),
            Err(e) => {
                warn!("Action failed: {:?}", e);
                self.console.failure(&format!("{:#}", e))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Session;
    use crate::common::engine::testing::MockEngine;
    use crate::common::ui::testing::{printed, scripted, BufferConsole};
    use crate::core::config::Config;
    use std::io::Cursor;

    pub type MockSession = Session<MockEngine, Cursor<Vec<u8>>, Vec<u8>>;

    pub fn session(engine: MockEngine, input: &str) -> MockSession {
        Session::new(engine, scripted(input), Config::default())
    }

    /// Splits a finished session into its engine and everything printed.
    pub fn finish(session: MockSession) -> (MockEngine, String) {
        let console: BufferConsole = session.console;
        (session.engine, printed(console))
    }
}
