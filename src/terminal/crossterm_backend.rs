//! [`Terminal`] backend backed by `crossterm`, for real stdout/stdin.

use std::io::{self, IsTerminal, Write as _};

use crossterm::terminal as ct_terminal;

use super::Terminal;
use crate::error::{Error, Result};
use crate::geometry::Size;

/// A [`Terminal`] implementation writing to real stdout, querying size and
/// raw-mode state via `crossterm`.
pub struct CrosstermBackend {
    out: io::Stdout,
    is_tty: bool,
    raw_mode_active: bool,
}

impl CrosstermBackend {
    /// Create a backend bound to the process's stdout/stdin.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            is_tty: io::stdout().is_terminal() && io::stdin().is_terminal(),
            raw_mode_active: false,
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermBackend {
    fn is_tty(&self) -> bool {
        self.is_tty
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if !self.is_tty {
            return Ok(());
        }
        ct_terminal::enable_raw_mode().map_err(|e| Error::Terminal(format!("enable raw mode: {e}")))?;
        self.raw_mode_active = true;
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        if !self.raw_mode_active {
            return Ok(());
        }
        ct_terminal::disable_raw_mode().map_err(|e| Error::Terminal(format!("disable raw mode: {e}")))?;
        self.raw_mode_active = false;
        Ok(())
    }

    fn size(&self) -> Result<Size> {
        if !self.is_tty {
            return Ok(Size::new(80, 24));
        }
        let (cols, rows) = ct_terminal::size().map_err(|e| Error::Terminal(format!("query size: {e}")))?;
        Ok(Size::new(cols, rows))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if self.raw_mode_active {
            let _ = ct_terminal::disable_raw_mode();
        }
    }
}
