//! Focus System - keyboard focus over a stack of contexts.
//!
//! A context is an ordered list of focusable components captured at one
//! point in time, plus the index of the focused one. Contexts stack: a
//! modal pushes its own focusables, closing it pops back to the layer
//! below. Only the top context is live.
//!
//! At most one component in the whole tree has `has_focus` set. Every
//! transition clears the previous holder before marking the next one, and
//! components hear about both through `Component::focus_changed`.
//!
//! # Example
//!
//! ```ignore
//! use spark_cells::state::FocusManager;
//!
//! let mut focus = FocusManager::new();
//! focus.reset(&mut tree, root);          // first focusable gets focus
//! focus.focus_next(&mut tree);
//! focus.push_context(&mut tree, &modal_buttons);
//! focus.pop_context(&mut tree);          // back to the root context, index 0
//! ```

use tracing::{debug, warn};

use crate::engine::Tree;
use crate::types::{Capabilities, NodeId};

// =============================================================================
// FOCUS CONTEXT
// =============================================================================

/// One layer of the focus stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusContext {
    items: Vec<NodeId>,
    index: usize,
}

impl FocusContext {
    fn new(items: Vec<NodeId>) -> Self {
        Self { items, index: 0 }
    }

    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The focused member, or None if the context is empty.
    pub fn current(&self) -> Option<NodeId> {
        self.items.get(self.index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// FOCUS MANAGER
// =============================================================================

/// Stack of focus contexts routing keys to exactly one component.
#[derive(Debug, Clone)]
pub struct FocusManager {
    // Never empty: the base context is created up front and never popped.
    stack: Vec<FocusContext>,
}

impl FocusManager {
    /// A manager with one empty context.
    pub fn new() -> Self {
        Self {
            stack: vec![FocusContext::default()],
        }
    }

    /// Focusable descendants of `root` in depth-first pre-order.
    pub fn focusable_descendants(tree: &Tree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .into_iter()
            .filter(|&id| tree.capabilities(id).contains(Capabilities::FOCUSABLE))
            .collect()
    }

    /// Replace the whole stack with one context holding every focusable
    /// descendant of `root`, and focus the first.
    pub fn reset(&mut self, tree: &mut Tree, root: NodeId) {
        self.blur(tree);
        let items = Self::focusable_descendants(tree, root);
        debug!(%root, focusables = items.len(), "focus reset");
        self.stack = vec![FocusContext::new(items)];
        self.apply(tree);
    }

    /// Move focus forward, wrapping. Returns false if the context is empty.
    pub fn focus_next(&mut self, tree: &mut Tree) -> bool {
        self.step(tree, 1)
    }

    /// Move focus backward, wrapping. Exact inverse of [`focus_next`].
    ///
    /// [`focus_next`]: FocusManager::focus_next
    pub fn focus_previous(&mut self, tree: &mut Tree) -> bool {
        self.step(tree, -1)
    }

    fn step(&mut self, tree: &mut Tree, delta: isize) -> bool {
        let len = self.top().items.len();
        if len == 0 {
            return false;
        }
        self.blur(tree);
        let top = self.top_mut();
        top.index = (top.index as isize + delta).rem_euclid(len as isize) as usize;
        self.apply(tree);
        true
    }

    /// Focus a specific member of the top context.
    ///
    /// Returns false (and changes nothing) if `id` is not in it.
    pub fn focus(&mut self, tree: &mut Tree, id: NodeId) -> bool {
        let Some(index) = self.top().items.iter().position(|&item| item == id) else {
            return false;
        };
        self.blur(tree);
        self.top_mut().index = index;
        self.apply(tree);
        true
    }

    /// Layer a new context on top, keeping only focusable components.
    pub fn push_context(&mut self, tree: &mut Tree, items: &[NodeId]) {
        self.blur(tree);
        let items: Vec<NodeId> = items
            .iter()
            .copied()
            .filter(|&id| tree.capabilities(id).contains(Capabilities::FOCUSABLE))
            .collect();
        self.stack.push(FocusContext::new(items));
        debug!(depth = self.stack.len(), "pushed focus context");
        self.apply(tree);
    }

    /// Drop the top context and focus the first item of the one below.
    ///
    /// The previous selection is not restored. The base context cannot be
    /// popped; that returns None.
    pub fn pop_context(&mut self, tree: &mut Tree) -> Option<Vec<NodeId>> {
        if self.stack.len() == 1 {
            warn!("refusing to pop the base focus context");
            return None;
        }
        self.blur(tree);
        let popped = self.stack.pop()?;
        self.top_mut().index = 0;
        debug!(depth = self.stack.len(), "popped focus context");
        self.apply(tree);
        Some(popped.items)
    }

    /// Forward a key to the focused component.
    ///
    /// Returns whether it was handled; false if nothing has focus.
    pub fn handle_key(&mut self, tree: &mut Tree, key: &str) -> bool {
        let Some(id) = self.focused() else {
            return false;
        };
        match tree.get_mut(id) {
            Some(component) => component.handle_event(key),
            None => {
                warn!(%id, "focused component no longer exists");
                false
            }
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.top().current()
    }

    /// Number of stacked contexts (at least 1).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The live (top) context.
    pub fn context(&self) -> &FocusContext {
        self.top()
    }

    fn top(&self) -> &FocusContext {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut FocusContext {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn blur(&self, tree: &mut Tree) {
        if let Some(id) = self.focused() {
            tree.set_focus(id, false);
        }
    }

    fn apply(&self, tree: &mut Tree) {
        if let Some(id) = self.focused() {
            if tree.set_focus(id, true) {
                debug!(%id, "focused");
            } else {
                warn!(%id, "stale component in focus context");
            }
        }
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
