//! # dockmgr UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal I/O for the interactive front end:
//!
//! - **`Console`**: line prompts, `(y/N)` confirmations, headings and
//!   separators over any `BufRead` + `Write` pair. Production code wraps
//!   stdin/stdout; tests wrap byte buffers.
//! - **`menu`**: the static menu screens and the parsing of a typed choice into
//!   an action enum.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::Console;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let mut console = Console::stdio();
//! let image = console.ask("Image name (e.g. nginx:latest)")?;
//! if console.confirm(&format!("Remove image {}?", image))? {
//!     console.line("Removing...")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
pub mod menu;

use crate::core::error::{DockmgrError, Result};
use anyhow::Context;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Prompt-and-print wrapper around an input and an output stream.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `label: `, then reads one trimmed line.
    ///
    /// Fails with `DockmgrError::InputClosed` at end of input.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks a yes/no question; only `y` or `yes` count as yes.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} (y/N)", question))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    /// Blocks until the user presses Enter.
    pub fn pause(&mut self) -> Result<()> {
        write!(self.output, "\nPress Enter to continue...")?;
        self.output.flush()?;
        self.read_line().map(|_| ())
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// A row of `ch` repeated `width` times.
    pub fn separator(&mut self, ch: char, width: usize) -> Result<()> {
        self.line(&ch.to_string().repeat(width))
    }

    /// Blank line, title, separator.
    pub fn heading(&mut self, title: &str, width: usize) -> Result<()> {
        writeln!(self.output)?;
        self.line(title)?;
        self.separator('-', width)
    }

    pub fn success(&mut self, text: &str) -> Result<()> {
        self.line(&format!("✅ {}", text))
    }

    pub fn failure(&mut self, text: &str) -> Result<()> {
        self.line(&format!("❌ {}", text))
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        write!(self.output, "{}", CLEAR_SCREEN)?;
        self.output.flush()?;
        Ok(())
    }

    /// Flushes pending output so an attached child process writes after it.
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush().context("Failed to flush output")
    }

    /// Gives back the output stream so tests can inspect what was printed.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Invalid UTF-8 is replaced rather than rejected, so it reaches the
    /// same validation as any other unexpected answer.
    fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut buf)
            .context("Failed to read from standard input")?;
        if read == 0 {
            return Err(DockmgrError::InputClosed.into());
        }
        Ok(String::from_utf8_lossy(&buf).trim().to_string())
    }
}

#[cfg(test)]
pub mod testing {
    use super::Console;
    use std::io::Cursor;

    pub type BufferConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    /// Console whose input is `script` and whose output is captured.
    pub fn scripted(script: &str) -> BufferConsole {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    pub fn printed(console: BufferConsole) -> String {
        String::from_utf8(console.into_output()).expect("console output is UTF-8")
    }
}
