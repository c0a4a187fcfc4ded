//! # dockmgr Interactive Menu
//!
//! File: cli/src/commands/menu.rs
//!
//! ## Overview
//!
//! The default mode of dockmgr: a main menu with three submenus (images,
//! containers, system). Each submenu loops until "Back" is chosen, running one
//! action per iteration and pausing afterwards so the output can be read.
//!
//! ## Error handling
//!
//! An action's error is printed with a `❌` prefix and the loop carries on.
//! The one exception is `DockmgrError::InputClosed`: once stdin is gone no
//! further choice can be read, so the loop unwinds and the program exits
//! cleanly.
//!
use super::{container, container::Lifecycle, image, system, Session};
use crate::common::engine::Engine;
use crate::common::ui::menu::{ContainerChoice, ImageChoice, MainChoice, Menu, SystemChoice};
use crate::core::error::{DockmgrError, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const CHOICE_PROMPT: &str = "Select an option";
const BANNER_WIDTH: usize = 60;

/// Runs the menu until the user exits or input ends.
pub async fn run_menu<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    info!("Starting interactive menu");
    match main_loop(session).await {
        Err(e) if DockmgrError::is_input_closed(&e) => {
            debug!("Input closed, leaving menu");
            session.console.line("\n\n👋 Input closed, exiting.")
        }
        other => other,
    }
}

async fn main_loop<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    loop {
        if session.config.ui.clear_screen {
            session.console.clear_screen()?;
        }
        session.console.separator('=', BANNER_WIDTH)?;
        session.console.line("🐳 DOCKMGR - CONTAINER MANAGEMENT")?;
        session.console.separator('=', BANNER_WIDTH)?;
        MainChoice::show(&mut session.console)?;

        let choice = session.console.ask(CHOICE_PROMPT)?;
        match MainChoice::from_choice(&choice) {
            Some(MainChoice::Images) => image_menu(session).await?,
            Some(MainChoice::Containers) => container_menu(session).await?,
            Some(MainChoice::System) => system_menu(session).await?,
            Some(MainChoice::Exit) => {
                return session.console.line("\n👋 Thanks for using dockmgr!");
            }
            None => {
                session.console.failure("Invalid option")?;
                pause(session)?;
            }
        }
    }
}

fn pause<E: Engine, R: BufRead, W: Write>(session: &mut Session<E, R, W>) -> Result<()> {
    if session.config.ui.pause_after_action {
        session.console.pause()?;
    }
    Ok(())
}

fn invalid_option<E: Engine, R: BufRead, W: Write>(session: &mut Session<E, R, W>) -> Result<()> {
    session.console.failure("Invalid option")
}

async fn image_menu<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    loop {
        ImageChoice::show(&mut session.console)?;
        let choice = session.console.ask(CHOICE_PROMPT)?;
        let outcome = match ImageChoice::from_choice(&choice) {
            Some(ImageChoice::Back) => return Ok(()),
            Some(ImageChoice::List) => image::list(session).await,
            Some(ImageChoice::Pull) => image::prompt_pull(session).await,
            Some(ImageChoice::Build) => image::prompt_build(session).await,
            Some(ImageChoice::Remove) => image::prompt_remove(session).await,
            None => invalid_option(session),
        };
        session.report(outcome)?;
        pause(session)?;
    }
}

async fn container_menu<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    loop {
        ContainerChoice::show(&mut session.console)?;
        let choice = session.console.ask(CHOICE_PROMPT)?;
        let outcome = match ContainerChoice::from_choice(&choice) {
            Some(ContainerChoice::Back) => return Ok(()),
            Some(ContainerChoice::ListRunning) => container::list(session, false).await,
            Some(ContainerChoice::ListAll) => container::list(session, true).await,
            Some(ContainerChoice::Run) => container::prompt_run(session).await,
            Some(ContainerChoice::Start) => {
                container::prompt_lifecycle(session, Lifecycle::Start).await
            }
            Some(ContainerChoice::Stop) => {
                container::prompt_lifecycle(session, Lifecycle::Stop).await
            }
            Some(ContainerChoice::Restart) => {
                container::prompt_lifecycle(session, Lifecycle::Restart).await
            }
            Some(ContainerChoice::Remove) => container::prompt_remove(session).await,
            Some(ContainerChoice::Logs) => container::prompt_logs(session).await,
            Some(ContainerChoice::Exec) => container::prompt_exec(session).await,
            None => invalid_option(session),
        };
        session.report(outcome)?;
        pause(session)?;
    }
}

async fn system_menu<E: Engine, R: BufRead, W: Write>(
    session: &mut Session<E, R, W>,
) -> Result<()> {
    loop {
        SystemChoice::show(&mut session.console)?;
        let choice = session.console.ask(CHOICE_PROMPT)?;
        let outcome = match SystemChoice::from_choice(&choice) {
            Some(SystemChoice::Back) => return Ok(()),
            Some(SystemChoice::Info) => system::show_info(session).await,
            Some(SystemChoice::DiskUsage) => system::disk_usage(session).await,
            Some(SystemChoice::Cleanup) => system::cleanup(session, false).await,
            None => invalid_option(session),
        };
        session.report(outcome)?;
        pause(session)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{finish, session};
    use crate::common::engine::args;
    use crate::common::engine::testing::MockEngine;
    use crate::common::ui::Console;
    use crate::core::config::Config;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_exit_immediately() {
        let mut s = session(MockEngine::new(), "4\n");
        run_menu(&mut s).await.unwrap();
        let (engine, out) = finish(s);
        assert!(engine.calls().is_empty());
        assert!(out.contains("🐳 DOCKMGR - CONTAINER MANAGEMENT"));
        assert!(out.contains("Thanks for using dockmgr!"));
    }

    #[tokio::test]
    async fn test_image_list_then_back_then_exit() {
        let engine = MockEngine::new().reply("images", "REPOSITORY TAG");
        // images menu, list, Enter to continue, back, exit
        let mut s = session(engine, "1\n1\n\n5\n4\n");
        run_menu(&mut s).await.unwrap();
        let (engine, out) = finish(s);
        assert_eq!(engine.invocations(), vec![args::list_images()]);
        assert!(out.contains("Press Enter to continue..."));
        assert!(out.contains("REPOSITORY TAG"));
    }

    #[tokio::test]
    async fn test_action_error_returns_to_menu() {
        let engine = MockEngine::new().fail("pull", "manifest unknown");
        // images, pull "nope", Enter, back, exit
        let mut s = session(engine, "1\n2\nnope\n\n5\n4\n");
        run_menu(&mut s).await.unwrap();
        let (engine, out) = finish(s);
        assert_eq!(engine.invocations(), vec![args::pull_image("nope")]);
        assert!(out.contains("❌ Failed to pull image nope"));
        assert!(out.contains("manifest unknown"));
        assert!(out.contains("Thanks for using dockmgr!"));
    }

    #[tokio::test]
    async fn test_invalid_choices() {
        // bad main choice + Enter, containers, bad choice + Enter, back, exit
        let mut s = session(MockEngine::new(), "9\n\n2\n42\n\n10\n4\n");
        run_menu(&mut s).await.unwrap();
        let (engine, out) = finish(s);
        assert!(engine.calls().is_empty());
        assert_eq!(out.matches("❌ Invalid option").count(), 2);
    }

    #[tokio::test]
    async fn test_undecodable_choice_is_an_invalid_option() {
        let console = Console::new(Cursor::new(b"\xfe\n\n4\n".to_vec()), Vec::new());
        let mut s = Session::new(MockEngine::new(), console, Config::default());
        run_menu(&mut s).await.unwrap();
        let (_, out) = finish(s);
        assert!(out.contains("❌ Invalid option"));
        assert!(out.contains("Thanks for using dockmgr!"));
    }

    #[tokio::test]
    async fn test_input_closed_mid_prompt_exits_cleanly() {
        // containers, run, image name, then EOF at the name prompt
        let mut s = session(MockEngine::new(), "2\n3\nnginx\n");
        run_menu(&mut s).await.unwrap();
        let (engine, out) = finish(s);
        assert!(engine.calls().is_empty());
        assert!(out.ends_with("👋 Input closed, exiting.\n"));
    }

    #[tokio::test]
    async fn test_system_menu_without_pause() {
        let mut s = session(MockEngine::new(), "3\n2\n1\n4\n4\n");
        s.config.ui.pause_after_action = false;
        run_menu(&mut s).await.unwrap();
        let (engine, out) = finish(s);
        assert_eq!(
            engine.invocations(),
            vec![args::disk_usage(), args::system_info()]
        );
        assert!(!out.contains("Press Enter"));
    }

    #[tokio::test]
    async fn test_clear_screen_when_configured() {
        let mut s = session(MockEngine::new(), "4\n");
        s.config.ui.clear_screen = true;
        run_menu(&mut s).await.unwrap();
        let (_, out) = finish(s);
        assert!(out.starts_with("\x1B[2J\x1B[H"));
    }
}
