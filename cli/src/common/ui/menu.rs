//! # Menu Screens (`common::ui::menu`)
//!
//! File: cli/src/common/ui/menu.rs
//!
//! Each menu is an enum implementing `Menu`. The position of a variant in
//! `ITEMS` is the number the user types (1-based); `show` renders the list
//! and `from_choice` maps the typed text back to a variant.
//!
use super::Console;
use crate::core::error::Result;
use std::io::{BufRead, Write};

pub trait Menu: Copy + 'static {
    const TITLE: &'static str;
    /// Width of the dashed line printed under the items.
    const WIDTH: usize;
    const ITEMS: &'static [(Self, &'static str)];

    /// Exact match on the item number, ignoring surrounding whitespace.
    fn from_choice(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::ITEMS
            .iter()
            .enumerate()
            .find(|(i, _)| (i + 1).to_string() == choice)
            .map(|(_, (item, _))| *item)
    }

    fn show<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
        console.line("")?;
        console.line(Self::TITLE)?;
        for (i, (_, label)) in Self::ITEMS.iter().enumerate() {
            console.line(&format!("{}. {}", i + 1, label))?;
        }
        console.separator('-', Self::WIDTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Images,
    Containers,
    System,
    Exit,
}

impl Menu for MainChoice {
    const TITLE: &'static str = "📋 MAIN MENU:";
    const WIDTH: usize = 30;
    const ITEMS: &'static [(Self, &'static str)] = &[
        (MainChoice::Images, "📦 Image management"),
        (MainChoice::Containers, "🐳 Container management"),
        (MainChoice::System, "🔧 System information"),
        (MainChoice::Exit, "🚪 Exit"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageChoice {
    List,
    Pull,
    Build,
    Remove,
    Back,
}

impl Menu for ImageChoice {
    const TITLE: &'static str = "📦 IMAGE MANAGEMENT:";
    const WIDTH: usize = 35;
    const ITEMS: &'static [(Self, &'static str)] = &[
        (ImageChoice::List, "📋 List all images"),
        (ImageChoice::Pull, "⬇️ Pull image"),
        (ImageChoice::Build, "🔨 Build image"),
        (ImageChoice::Remove, "🗑️ Remove image"),
        (ImageChoice::Back, "⬅️ Back to main menu"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerChoice {
    ListRunning,
    ListAll,
    Run,
    Start,
    Stop,
    Restart,
    Remove,
    Logs,
    Exec,
    Back,
}

impl Menu for ContainerChoice {
    const TITLE: &'static str = "🐳 CONTAINER MANAGEMENT:";
    const WIDTH: usize = 40;
    const ITEMS: &'static [(Self, &'static str)] = &[
        (ContainerChoice::ListRunning, "📋 List running containers"),
        (ContainerChoice::ListAll, "📋 List all containers"),
        (ContainerChoice::Run, "🚀 Run new container"),
        (ContainerChoice::Start, "▶️ Start container"),
        (ContainerChoice::Stop, "⏹️ Stop container"),
        (ContainerChoice::Restart, "🔄 Restart container"),
        (ContainerChoice::Remove, "🗑️ Remove container"),
        (ContainerChoice::Logs, "📄 View container logs"),
        (ContainerChoice::Exec, "💻 Open shell in container"),
        (ContainerChoice::Back, "⬅️ Back to main menu"),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemChoice {
    Info,
    DiskUsage,
    Cleanup,
    Back,
}

impl Menu for SystemChoice {
    const TITLE: &'static str = "🔧 SYSTEM INFORMATION:";
    const WIDTH: usize = 35;
    const ITEMS: &'static [(Self, &'static str)] = &[
        (SystemChoice::Info, "📊 Engine system information"),
        (SystemChoice::DiskUsage, "💾 Disk usage"),
        (SystemChoice::Cleanup, "🧹 Clean up system"),
        (SystemChoice::Back, "⬅️ Back to main menu"),
    ];
}
