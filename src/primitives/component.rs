//! Component base - geometry, chrome and lifecycle shared by every node.
//!
//! A component is anything implementing [`Component`]. The trait is the
//! drawable capability; container and focusable capabilities are layered on
//! by the tree (a node with a layout) and by `ComponentBase::focusable`.
//!
//! # Ownership of geometry
//!
//! `x`, `y`, `width` and `height` belong to the parent's layout pass. Only a
//! `fixed` component keeps caller-assigned coordinates.

use crate::error::{Error, Result};
use crate::layout::Align;
use crate::state::{State, TaskHandle};
use crate::types::{Grid, ROUNDED};
use super::types::{Cleanup, ComponentProps};

// =============================================================================
// Component Trait
// =============================================================================

/// The drawable contract every node implements.
pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Draw a fresh grid of exactly `height` rows by `width` columns.
    ///
    /// Implementations usually start from `self.base().draw_base()` and
    /// overlay their own glyphs.
    fn draw(&self) -> Grid {
        self.base().draw_base()
    }

    /// Handle a normalized key name. Return true if visible state changed.
    fn handle_event(&mut self, _key: &str) -> bool {
        false
    }

    /// Called by the focus manager after `has_focus` flips.
    fn focus_changed(&mut self, _focused: bool) {}

    /// Release bindings and cancel owned tasks.
    fn destroy(&mut self) {
        self.base_mut().release();
    }

    /// Short type name for diagnostics.
    fn name(&self) -> &'static str {
        "component"
    }
}

// =============================================================================
// Component Base
// =============================================================================

/// State shared by all components.
pub struct ComponentBase {
    width: u16,
    height: u16,
    auto_width: bool,
    auto_height: bool,
    x: i32,
    y: i32,
    z: i32,
    border: bool,
    label: Option<String>,
    show_label: bool,
    fill: char,
    align: Option<Align>,
    fixed: bool,
    focusable: bool,
    has_focus: bool,
    transparent: char,
    cleanups: Vec<Cleanup>,
    tasks: Vec<TaskHandle>,
}

impl ComponentBase {
    /// Build a base from props.
    ///
    /// Fails with [`Error::InvalidSize`] if an explicit width or height is 0.
    /// An unset dimension starts at 1 and is filled in by the parent layout.
    pub fn new(props: ComponentProps) -> Result<Self> {
        if props.width == Some(0) || props.height == Some(0) {
            return Err(Error::InvalidSize {
                width: props.width.unwrap_or(1),
                height: props.height.unwrap_or(1),
            });
        }

        Ok(Self {
            width: props.width.unwrap_or(1),
            height: props.height.unwrap_or(1),
            auto_width: props.width.is_none(),
            auto_height: props.height.is_none(),
            x: props.x,
            y: props.y,
            z: props.z,
            border: props.border,
            label: props.label,
            show_label: props.show_label,
            fill: props.fill,
            align: props.align,
            fixed: props.fixed,
            focusable: props.focusable,
            has_focus: false,
            transparent: props.transparent,
            cleanups: Vec::new(),
            tasks: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn set_z(&mut self, z: i32) {
        self.z = z;
    }

    /// True if the width was left for the parent layout to decide.
    pub fn auto_width(&self) -> bool {
        self.auto_width
    }

    pub fn auto_height(&self) -> bool {
        self.auto_height
    }

    /// Set an explicit size. The parent layout stops auto-filling it.
    pub fn set_size(&mut self, width: u16, height: u16) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        self.width = width;
        self.height = height;
        self.auto_width = false;
        self.auto_height = false;
        Ok(())
    }

    /// Move the component. Flowed components are repositioned on the next
    /// layout pass; fixed components keep this position.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Layout-owned resize. Never drops below one cell and keeps auto flags.
    pub(crate) fn assign_size(&mut self, width: Option<u16>, height: Option<u16>) {
        if let Some(width) = width {
            self.width = width.max(1);
        }
        if let Some(height) = height {
            self.height = height.max(1);
        }
    }

    /// Cells reserved on each edge by the border.
    #[inline]
    pub fn padding(&self) -> u16 {
        self.border as u16
    }

    /// Size of the content area inside the border.
    pub fn inner_size(&self) -> (u16, u16) {
        let pad = self.padding() * 2;
        (
            self.width.saturating_sub(pad),
            self.height.saturating_sub(pad),
        )
    }

    // -------------------------------------------------------------------------
    // Chrome
    // -------------------------------------------------------------------------

    pub fn border(&self) -> bool {
        self.border
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn fill(&self) -> char {
        self.fill
    }

    pub fn align(&self) -> Option<Align> {
        self.align
    }

    pub fn fixed(&self) -> bool {
        self.fixed
    }

    pub fn transparent(&self) -> char {
        self.transparent
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focusable(&self) -> bool {
        self.focusable
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Only the focus manager flips this.
    pub(crate) fn set_focus(&mut self, focused: bool) {
        self.has_focus = focused;
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Background, border and label as a fresh `height` x `width` grid.
    pub fn draw_base(&self) -> Grid {
        let mut grid = Grid::new(self.width, self.height, self.fill);
        let right = self.width as i32 - 1;
        let bottom = self.height as i32 - 1;

        if self.border {
            for x in 0..=right {
                grid.set(x, 0, ROUNDED.horizontal);
                grid.set(x, bottom, ROUNDED.horizontal);
            }
            for y in 0..=bottom {
                grid.set(0, y, ROUNDED.vertical);
                grid.set(right, y, ROUNDED.vertical);
            }
            grid.set(0, 0, ROUNDED.top_left);
            grid.set(right, 0, ROUNDED.top_right);
            grid.set(right, bottom, ROUNDED.bottom_right);
            grid.set(0, bottom, ROUNDED.bottom_left);
        }

        if let (true, Some(label)) = (self.show_label, self.label.as_deref()) {
            let pad = self.padding() as i32;
            let room = (self.width as i32 - pad * 2).max(0);
            let text: String = label.chars().take(room as usize).collect();
            let start = pad + (room - text.chars().count() as i32) / 2;
            grid.write_str(start, 0, &text);
        }

        grid
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Subscribe to a state and keep the unsubscribe for `release()`.
    ///
    /// The callback runs once immediately with the current value.
    pub fn bind<T, F>(&mut self, state: &State<T>, callback: F)
    where
        T: Clone + PartialEq + 'static,
        F: Fn(&T) + 'static,
    {
        let subscription = state.subscribe(callback);
        let state = state.clone();
        self.cleanups.push(Box::new(move || {
            state.unsubscribe(&subscription);
        }));
    }

    /// Tie a scheduled task to this component's lifetime.
    pub fn own_task(&mut self, task: TaskHandle) {
        self.tasks.push(task);
    }

    /// Number of live state bindings.
    pub fn binding_count(&self) -> usize {
        self.cleanups.len()
    }

    /// Run all unsubscribes and cancel owned tasks. Idempotent.
    pub fn release(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        for task in self.tasks.drain(..) {
            task.cancel();
        }
    }
}

impl Drop for ComponentBase {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ComponentBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentBase")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .field("fixed", &self.fixed)
            .field("focusable", &self.focusable)
            .field("has_focus", &self.has_focus)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
