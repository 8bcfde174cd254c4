//! Renderer Module - frame sinks.
//!
//! The core hands every finished frame to a [`RenderSink`]. Which sink is
//! active is invisible to layout, compositing and focus:
//!
//! - [`TerminalSink`] - clears the screen and writes the rows (crossterm)
//! - [`SurfaceSink`] - sets the joined rows as a display surface's text
//! - [`MemorySink`] - keeps frames for inspection in tests and tools

mod memory;
mod surface;
mod terminal;

pub use memory::MemorySink;
pub use surface::{SurfaceHost, SurfaceSink, TextSurface};
pub use terminal::TerminalSink;

use crate::error::Result;
use crate::types::Grid;

/// Destination for composed frames.
pub trait RenderSink {
    fn render(&mut self, grid: &Grid) -> Result<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn render(&mut self, grid: &Grid) -> Result<()> {
        (**self).render(grid)
    }
}
