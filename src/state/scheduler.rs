//! Render Scheduler - explicit repaint requests.
//!
//! Anything that wants a repaint (a state listener, an animation task)
//! holds a clone of the application's scheduler and calls
//! [`RenderScheduler::request_render`]. The application checks
//! [`RenderScheduler::is_pending`] and renders once per batch of requests.
//!
//! The generation counter is a spark-signals `Signal`, so an `effect` can
//! observe repaint requests too.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

/// Per-application repaint request handle. Clones share state.
#[derive(Clone)]
pub struct RenderScheduler {
    generation: Signal<u64>,
    rendered: Rc<Cell<u64>>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            generation: signal(0),
            rendered: Rc::new(Cell::new(0)),
        }
    }

    /// Ask for a repaint. Requests coalesce until the next render.
    pub fn request_render(&self) {
        let next = self.generation.get() + 1;
        self.generation.set(next);
    }

    /// True if a repaint was requested since the last render.
    pub fn is_pending(&self) -> bool {
        self.generation.get() != self.rendered.get()
    }

    /// Number of requests made so far.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// The generation signal, for use inside `effect`/`derived`.
    pub fn signal(&self) -> Signal<u64> {
        self.generation.clone()
    }

    /// Record that a frame covering every request so far was rendered.
    pub(crate) fn mark_rendered(&self) {
        self.rendered.set(self.generation.get());
    }
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}
