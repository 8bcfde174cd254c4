//! Text primitive - lines of text inside the component's content area.
//!
//! Content is either a static string or a [`State<String>`] read at draw
//! time. A state-backed text created with [`Text::bound`] also requests a
//! render whenever the state changes.
//!
//! # Example
//!
//! ```ignore
//! let title = state("Hello".to_string());
//! let text = Text::bound(ComponentProps::default(), &title, app.scheduler())?;
//! title.set("World".to_string()); // schedules a repaint
//! ```

use crate::error::Result;
use crate::state::{RenderScheduler, State};
use crate::types::Grid;
use super::component::{Component, ComponentBase};
use super::types::ComponentProps;

// =============================================================================
// Content
// =============================================================================

/// Text content: fixed, or read from a state on every draw.
#[derive(Clone)]
pub enum Content {
    Static(String),
    State(State<String>),
}

impl Content {
    pub fn get(&self) -> String {
        match self {
            Self::Static(s) => s.clone(),
            Self::State(s) => s.get(),
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Static(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Static(s)
    }
}

impl From<State<String>> for Content {
    fn from(s: State<String>) -> Self {
        Self::State(s)
    }
}

// =============================================================================
// Text
// =============================================================================

/// Multi-line text. Lines past the content area are clipped.
pub struct Text {
    base: ComponentBase,
    content: Content,
}

impl Text {
    pub fn new(props: ComponentProps, content: impl Into<Content>) -> Result<Self> {
        Ok(Self {
            base: ComponentBase::new(props)?,
            content: content.into(),
        })
    }

    /// Text that follows `state` and asks `scheduler` for a repaint on change.
    pub fn bound(
        props: ComponentProps,
        state: &State<String>,
        scheduler: &RenderScheduler,
    ) -> Result<Self> {
        let mut text = Self::new(props, state.clone())?;
        let scheduler = scheduler.clone();
        text.base.bind(state, move |_| scheduler.request_render());
        Ok(text)
    }

    pub fn content(&self) -> String {
        self.content.get()
    }

    pub fn set_content(&mut self, content: impl Into<Content>) {
        self.content = content.into();
    }
}

impl Component for Text {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn draw(&self) -> Grid {
        let mut grid = self.base.draw_base();
        let pad = self.base.padding() as i32;
        let (inner_width, inner_height) = self.base.inner_size();

        for (row, line) in self.content.get().lines().take(inner_height as usize).enumerate() {
            let visible: String = line.chars().take(inner_width as usize).collect();
            grid.write_str(pad, pad + row as i32, &visible);
        }
        grid
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

// =============================================================================
// Tests
// =============================================================================
