//! Application root - owns the tree, focus, scheduler and sink.
//!
//! The root is a column (by default) sized to the screen. Structural
//! changes made through the app (`add_child`, `remove_child`, `destroy`,
//! `resize`) recompute the focus context from the whole tree and render
//! immediately. Keys arrive already normalized (see
//! [`keyboard`](crate::state::keyboard)):
//!
//! - `Tab` and `Shift` move focus forward/backward and always re-render
//! - anything else goes to the focused component; a render follows only if
//!   it reports the key as handled
//!
//! Background work (state listeners, timer tasks) never renders directly.
//! It asks the [`RenderScheduler`], and the owner of the event loop calls
//! [`App::flush`] or [`App::tick`].
//!
//! # Example
//!
//! ```ignore
//! use spark_cells::{App, AppConfig, ComponentProps, TerminalSink, Text};
//!
//! let mut app = App::new(AppConfig::sized(40, 10), TerminalSink::stdout())?;
//! let title = app.insert(Text::new(ComponentProps::default(), "Hello")?);
//! app.add_child(title)?;
//!
//! loop {
//!     let key = read_key()?;            // host-specific translation
//!     app.handle_key(&key)?;
//!     app.tick(frame_time)?;
//! }
//! ```

use std::time::Duration;

use tracing::{debug, warn};

use crate::engine::Tree;
use crate::error::Result;
use crate::layout::{Direction, LayoutSpec};
use crate::primitives::{Block, Component, ComponentProps};
use crate::renderer::RenderSink;
use crate::state::{keyboard, FocusManager, RenderScheduler, Timers};
use crate::types::NodeId;
use super::compose::composite;

// =============================================================================
// Configuration
// =============================================================================

/// Options for the root container.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub width: u16,
    pub height: u16,
    pub border: bool,
    pub label: Option<String>,
    pub fill: char,
    pub direction: Direction,
    pub fit: bool,
    pub gap: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            border: false,
            label: None,
            fill: ' ',
            direction: Direction::Column,
            fit: false,
            gap: 0,
        }
    }
}

impl AppConfig {
    pub fn sized(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

// =============================================================================
// App
// =============================================================================

/// A running application.
pub struct App<S: RenderSink> {
    tree: Tree,
    root: NodeId,
    focus: FocusManager,
    sink: S,
    scheduler: RenderScheduler,
    timers: Timers,
    frames: u64,
}

impl<S: RenderSink> App<S> {
    /// Build the root, compute focus and render the first frame.
    ///
    /// Fails if the size is zero or the first frame can't be written.
    pub fn new(config: AppConfig, sink: S) -> Result<Self> {
        let root = Block::new(ComponentProps {
            width: Some(config.width),
            height: Some(config.height),
            border: config.border,
            label: config.label,
            fill: config.fill,
            ..Default::default()
        })?;

        let mut tree = Tree::new();
        let root = tree.insert_layout(
            root,
            LayoutSpec {
                direction: config.direction,
                fit: config.fit,
                gap: config.gap,
            },
        );

        let mut app = Self {
            tree,
            root,
            focus: FocusManager::new(),
            sink,
            scheduler: RenderScheduler::new(),
            timers: Timers::new(),
            frames: 0,
        };
        debug!(width = config.width, height = config.height, "app created");
        app.refresh()?;
        Ok(app)
    }

    // -------------------------------------------------------------------------
    // Tree construction
    // -------------------------------------------------------------------------

    /// Store a leaf. It is not visible until added to a container.
    pub fn insert(&mut self, component: impl Component + 'static) -> NodeId {
        self.tree.insert(component)
    }

    /// Store a container.
    pub fn insert_layout(&mut self, component: impl Component + 'static, layout: LayoutSpec) -> NodeId {
        self.tree.insert_layout(component, layout)
    }

    /// Add `child` under the root.
    pub fn add_child(&mut self, child: NodeId) -> Result<()> {
        self.add_child_to(self.root, child)
    }

    /// Add `child` under any container in the tree.
    pub fn add_child_to(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.tree.add_child(parent, child)?;
        self.refresh()
    }

    /// Detach `child` from its parent. Returns false if it had none.
    pub fn remove_child(&mut self, child: NodeId) -> Result<bool> {
        let Some(parent) = self.tree.parent(child) else {
            return Ok(false);
        };
        self.tree.remove_child(parent, child)?;
        self.refresh()?;
        Ok(true)
    }

    /// Destroy a subtree: detach it, release bindings, cancel tasks.
    ///
    /// The root itself lives as long as the app.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            warn!("ignoring request to destroy the app root");
            return Ok(());
        }
        self.tree.destroy(id)?;
        self.refresh()
    }

    /// Resize the root to the new screen size and render.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.tree.base_mut(self.root)?.set_size(width, height)?;
        debug!(width, height, "app resized");
        self.render()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Open a focus scope (a modal, a menu) over the given components.
    pub fn push_focus_context(&mut self, items: &[NodeId]) -> Result<()> {
        self.focus.push_context(&mut self.tree, items);
        self.render()
    }

    /// Close the top focus scope. None if only the base scope is left.
    pub fn pop_focus_context(&mut self) -> Result<Option<Vec<NodeId>>> {
        let popped = self.focus.pop_context(&mut self.tree);
        if popped.is_some() {
            self.render()?;
        }
        Ok(popped)
    }

    /// Route a normalized key. Returns whether anything consumed it.
    pub fn handle_key(&mut self, key: &str) -> Result<bool> {
        match key {
            keyboard::TAB => {
                self.focus.focus_next(&mut self.tree);
                self.render()?;
                Ok(true)
            }
            keyboard::SHIFT => {
                self.focus.focus_previous(&mut self.tree);
                self.render()?;
                Ok(true)
            }
            _ => {
                let handled = self.focus.handle_key(&mut self.tree, key);
                if handled {
                    self.render()?;
                }
                Ok(handled)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Recompute focus from the whole tree, then render.
    pub fn refresh(&mut self) -> Result<()> {
        self.focus.reset(&mut self.tree, self.root);
        self.render()
    }

    /// Compose the full screen and hand it to the sink.
    pub fn render(&mut self) -> Result<()> {
        let (width, height) = {
            let root = self.tree.base(self.root)?;
            (root.width(), root.height())
        };
        let screen = composite(&mut self.tree, self.root, width, height)?;
        self.sink.render(&screen)?;

        self.frames += 1;
        self.scheduler.mark_rendered();
        debug!(frame = self.frames, "rendered");
        Ok(())
    }

    /// Render if a repaint was requested since the last frame.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.scheduler.is_pending() {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Advance timers by `dt`, then flush. Returns whether a frame was drawn.
    pub fn tick(&mut self, dt: Duration) -> Result<bool> {
        self.timers.advance(dt);
        self.flush()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Direct tree access. Call [`App::refresh`] after structural edits.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn focus(&self) -> &FocusManager {
        &self.focus
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    /// Handle for anything that needs to request a repaint.
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Timer registry advanced by [`App::tick`].
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::primitives::{ComponentBase, Text};
    use crate::renderer::MemorySink;
    use crate::state::{state, State};

    /// Focusable counter: Enter increments, anything else is ignored.
    struct Counter {
        base: ComponentBase,
        count: State<i32>,
    }

    impl Counter {
        fn new(count: &State<i32>) -> Self {
            Self {
                base: ComponentBase::new(ComponentProps {
                    focusable: true,
                    height: Some(1),
                    ..Default::default()
                })
                .unwrap(),
                count: count.clone(),
            }
        }
    }

    impl Component for Counter {
        fn base(&self) -> &ComponentBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ComponentBase {
            &mut self.base
        }

        fn draw(&self) -> crate::types::Grid {
            let mut grid = self.base.draw_base();
            let marker = if self.base.has_focus() { '>' } else { ' ' };
            grid.write_str(0, 0, &format!("{marker}{}", self.count.get()));
            grid
        }

        fn handle_event(&mut self, key: &str) -> bool {
            if key == keyboard::ENTER {
                self.count.update(|c| c + 1);
                return true;
            }
            false
        }
    }

    fn app(width: u16, height: u16) -> (App<MemorySink>, MemorySink) {
        let sink = MemorySink::new();
        let app = App::new(AppConfig::sized(width, height), sink.clone()).unwrap();
        (app, sink)
    }

    #[test]
    fn test_new_renders_first_frame() {
        let (app, sink) = app(5, 2);
        assert_eq!(sink.count(), 1);
        assert_eq!(app.frame_count(), 1);
        assert_eq!(sink.last().unwrap().to_lines(), vec!["     ", "     "]);
    }

    #[test]
    fn test_zero_size_fails() {
        let result = App::new(AppConfig::sized(0, 5), MemorySink::new());
        assert!(matches!(result, Err(Error::InvalidSize { .. })));
    }

    #[test]
    fn test_add_child_refocuses_and_renders() {
        let (mut app, sink) = app(6, 3);
        let count = state(0);
        let counter = app.insert(Counter::new(&count));
        app.add_child(counter).unwrap();

        assert_eq!(app.focused(), Some(counter));
        assert_eq!(sink.count(), 2);
        assert_eq!(sink.last().unwrap().to_lines()[0], ">0    ");
    }

    #[test]
    fn test_tab_and_shift_always_render() {
        let (mut app, sink) = app(6, 3);
        let count = state(0);
        let a = app.insert(Counter::new(&count));
        let b = app.insert(Counter::new(&count));
        app.add_child(a).unwrap();
        app.add_child(b).unwrap();
        let before = sink.count();

        assert!(app.handle_key(keyboard::TAB).unwrap());
        assert_eq!(app.focused(), Some(b));
        assert!(app.handle_key(keyboard::SHIFT).unwrap());
        assert_eq!(app.focused(), Some(a));
        assert_eq!(sink.count(), before + 2);
    }

    #[test]
    fn test_unhandled_key_does_not_render() {
        let (mut app, sink) = app(6, 3);
        let count = state(0);
        let counter = app.insert(Counter::new(&count));
        app.add_child(counter).unwrap();
        let before = sink.count();

        assert!(!app.handle_key("x").unwrap());
        assert_eq!(sink.count(), before);

        assert!(app.handle_key(keyboard::ENTER).unwrap());
        assert_eq!(count.get(), 1);
        assert_eq!(sink.count(), before + 1);
        assert_eq!(sink.last().unwrap().to_lines()[0], ">1    ");
    }

    #[test]
    fn test_keys_without_focus_are_ignored() {
        let (mut app, sink) = app(4, 1);
        assert!(!app.handle_key(keyboard::ENTER).unwrap());
        assert!(app.handle_key(keyboard::TAB).unwrap());
        assert_eq!(app.focused(), None);
        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_state_change_is_flushed_once() {
        let (mut app, sink) = app(8, 1);
        let title = state("one".to_string());
        let text = Text::bound(ComponentProps::default(), &title, app.scheduler()).unwrap();
        let text = app.insert(text);
        app.add_child(text).unwrap();
        assert!(!app.flush().unwrap());

        title.set("two".to_string());
        title.set("three".to_string());
        let before = sink.count();
        assert!(app.flush().unwrap());
        assert!(!app.flush().unwrap());
        assert_eq!(sink.count(), before + 1);
        assert_eq!(sink.last().unwrap().to_lines(), vec!["three   "]);
    }

    #[test]
    fn test_tick_runs_timers_then_flushes() {
        let (mut app, sink) = app(4, 1);
        let scheduler = app.scheduler().clone();
        let _task = app
            .timers()
            .every(Duration::from_millis(100), move || scheduler.request_render());

        assert!(!app.tick(Duration::from_millis(50)).unwrap());
        assert!(app.tick(Duration::from_millis(50)).unwrap());
        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_destroy_cancels_tasks_and_refocuses() {
        let (mut app, _sink) = app(6, 4);
        let count = state(0);
        let a = app.insert(Counter::new(&count));
        let b = app.insert(Counter::new(&count));
        app.add_child(a).unwrap();
        app.add_child(b).unwrap();

        let task = app.timers().every(Duration::from_millis(10), || {});
        app.tree_mut().base_mut(a).unwrap().own_task(task.clone());

        app.destroy(a).unwrap();
        assert!(!task.is_active());
        assert!(!app.tree().contains(a));
        assert_eq!(app.focused(), Some(b));

        let root = app.root();
        app.destroy(root).unwrap();
        assert!(app.tree().contains(root));
    }

    #[test]
    fn test_remove_child_detaches() {
        let (mut app, sink) = app(6, 2);
        let count = state(0);
        let counter = app.insert(Counter::new(&count));
        app.add_child(counter).unwrap();

        assert!(app.remove_child(counter).unwrap());
        assert!(!app.remove_child(counter).unwrap());
        assert_eq!(app.focused(), None);
        assert_eq!(sink.last().unwrap().to_lines()[0], "      ");
    }

    #[test]
    fn test_resize_relays_out_children() {
        let (mut app, sink) = app(4, 2);
        let text = app.insert(Text::new(ComponentProps::default(), "hi").unwrap());
        app.add_child(text).unwrap();

        app.resize(8, 3).unwrap();
        assert_eq!(app.tree().base(text).unwrap().width(), 8);
        let frame = sink.last().unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 3));
    }

    #[test]
    fn test_focus_context_scoping() {
        let (mut app, _sink) = app(6, 4);
        let count = state(0);
        let ids: Vec<NodeId> = (0..3)
            .map(|_| {
                let id = app.insert(Counter::new(&count));
                app.add_child(id).unwrap();
                id
            })
            .collect();

        app.push_focus_context(&[ids[2]]).unwrap();
        assert_eq!(app.focused(), Some(ids[2]));
        app.handle_key(keyboard::TAB).unwrap();
        assert_eq!(app.focused(), Some(ids[2]));

        assert_eq!(app.pop_focus_context().unwrap(), Some(vec![ids[2]]));
        assert_eq!(app.focused(), Some(ids[0]));
        assert_eq!(app.pop_focus_context().unwrap(), None);
    }
}
