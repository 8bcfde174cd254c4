//! Terminal sink.
//!
//! Each frame clears the screen, homes the cursor and writes the rows
//! separated by `\r\n` (correct in both cooked and raw mode). Writes are
//! queued and flushed once per frame.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::trace;

use crate::error::Result;
use crate::types::Grid;
use super::RenderSink;

/// Writes frames to a terminal (or anything implementing `Write`).
pub struct TerminalSink<W: Write> {
    out: W,
    fullscreen: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            fullscreen: false,
        }
    }

    /// Switch to the alternate screen and hide the cursor.
    pub fn enter_fullscreen(&mut self) -> Result<()> {
        execute!(self.out, EnterAlternateScreen, Hide)?;
        self.fullscreen = true;
        Ok(())
    }

    /// Restore the main screen and cursor. No-op if not fullscreen.
    pub fn exit_fullscreen(&mut self) -> Result<()> {
        if self.fullscreen {
            execute!(self.out, Show, LeaveAlternateScreen)?;
            self.fullscreen = false;
        }
        Ok(())
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TerminalSink<W> {
    fn render(&mut self, grid: &Grid) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        let frame = grid.to_lines().join("\r\n");
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        trace!(width = grid.width(), height = grid.height(), "wrote frame to terminal");
        Ok(())
    }
}
