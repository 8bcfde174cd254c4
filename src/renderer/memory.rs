//! In-memory sink. Clones share the frame list.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::types::Grid;
use super::RenderSink;

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    frames: Rc<RefCell<Vec<Grid>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent frame.
    pub fn last(&self) -> Option<Grid> {
        self.frames.borrow().last().cloned()
    }

    /// Number of frames received.
    pub fn count(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn frames(&self) -> Vec<Grid> {
        self.frames.borrow().clone()
    }
}

impl RenderSink for MemorySink {
    fn render(&mut self, grid: &Grid) -> Result<()> {
        self.frames.borrow_mut().push(grid.clone());
        Ok(())
    }
}
