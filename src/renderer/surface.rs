//! Display-surface sink.
//!
//! Targets anything that can take a block of text as its content, the way a
//! document element takes `textContent`. The surface is looked up once, when
//! the sink is attached; a missing target is a construction error.

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Grid;
use super::RenderSink;

/// A display element whose whole content is replaced by each frame.
pub trait TextSurface {
    fn set_text_content(&mut self, text: &str);
}

impl TextSurface for String {
    fn set_text_content(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Resolves surface ids to surfaces (a document, a window registry, ...).
pub trait SurfaceHost {
    type Surface: TextSurface;

    fn surface(&self, id: &str) -> Option<Self::Surface>;
}

/// Sets the frame's rows, joined with `\n`, as the surface's text.
pub struct SurfaceSink<T: TextSurface> {
    surface: T,
}

impl<T: TextSurface> SurfaceSink<T> {
    pub fn new(surface: T) -> Self {
        Self { surface }
    }

    /// Look up `id` on `host`.
    ///
    /// Fails with [`Error::MissingRenderTarget`] if the host has no such
    /// surface.
    pub fn attach<H>(host: &H, id: &str) -> Result<Self>
    where
        H: SurfaceHost<Surface = T>,
    {
        let surface = host
            .surface(id)
            .ok_or_else(|| Error::MissingRenderTarget(id.to_string()))?;
        debug!(target_id = id, "attached surface sink");
        Ok(Self::new(surface))
    }

    pub fn surface(&self) -> &T {
        &self.surface
    }
}

impl<T: TextSurface> RenderSink for SurfaceSink<T> {
    fn render(&mut self, grid: &Grid) -> Result<()> {
        self.surface.set_text_content(&grid.to_string());
        Ok(())
    }
}
