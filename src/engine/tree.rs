//! Component Tree - arena storage for the component hierarchy.
//!
//! Components live in slots addressed by [`NodeId`]. A slot carries a
//! generation that is bumped whenever its component is destroyed, so a
//! stale handle is reported as [`Error::UnknownNode`] instead of silently
//! reaching whatever reused the slot.
//!
//! Ownership runs downward only: a node's `children` list is the ownership
//! edge, `parent` is a back-reference used for ascending walks
//! ([`Tree::ancestors`], [`Tree::absolute_origin`]). Destruction always
//! follows child lists.
//!
//! A node is a container if it has a [`LayoutSpec`]. Adding or removing a
//! child re-runs the container's layout synchronously, and drawing a
//! container re-runs it before compositing its children.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::layout::{LayoutFrame, LayoutSpec};
use crate::primitives::{Component, ComponentBase};
use crate::types::{Capabilities, Grid, NodeId};

// =============================================================================
// Storage
// =============================================================================

struct Node {
    component: Box<dyn Component>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    layout: Option<LayoutSpec>,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of components.
#[derive(Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Store a leaf component. It stays detached until added to a container.
    pub fn insert(&mut self, component: impl Component + 'static) -> NodeId {
        self.insert_boxed(Box::new(component), None)
    }

    /// Store a component with the container capability.
    pub fn insert_layout(&mut self, component: impl Component + 'static, layout: LayoutSpec) -> NodeId {
        self.insert_boxed(Box::new(component), Some(layout))
    }

    pub fn insert_boxed(&mut self, component: Box<dyn Component>, layout: Option<LayoutSpec>) -> NodeId {
        let node = Node {
            component,
            parent: None,
            children: Vec::new(),
            layout,
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(index, 0)
            }
        };

        debug!(%id, container = layout.is_some(), "inserted component");
        id
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
            .ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .ok_or(Error::UnknownNode(id))
    }

    /// True if the handle refers to a live component.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live components.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&dyn Component> {
        self.node(id).ok().map(|node| node.component.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut (dyn Component + 'static)> {
        self.node_mut(id).ok().map(|node| node.component.as_mut())
    }

    pub fn base(&self, id: NodeId) -> Result<&ComponentBase> {
        self.node(id).map(|node| node.component.base())
    }

    pub fn base_mut(&mut self, id: NodeId) -> Result<&mut ComponentBase> {
        self.node_mut(id).map(|node| node.component.base_mut())
    }

    pub fn layout_spec(&self, id: NodeId) -> Option<LayoutSpec> {
        self.node(id).ok().and_then(|node| node.layout)
    }

    /// Change a container's layout options and re-run its layout.
    ///
    /// Passing `None` to a node with children is refused; it would orphan
    /// them.
    pub fn set_layout(&mut self, id: NodeId, layout: Option<LayoutSpec>) -> Result<()> {
        let node = self.node_mut(id)?;
        if layout.is_none() && !node.children.is_empty() {
            return Err(Error::NotAContainer(id));
        }
        node.layout = layout;
        self.recalculate_layout(id)
    }

    pub fn capabilities(&self, id: NodeId) -> Capabilities {
        let Ok(node) = self.node(id) else {
            return Capabilities::empty();
        };
        let mut caps = Capabilities::DRAWABLE;
        caps.set(Capabilities::CONTAINER, node.layout.is_some());
        caps.set(Capabilities::FOCUSABLE, node.component.base().focusable());
        caps
    }

    pub fn is_container(&self, id: NodeId) -> bool {
        self.capabilities(id).contains(Capabilities::CONTAINER)
    }

    // -------------------------------------------------------------------------
    // Traversal
    // -------------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|node| node.parent)
    }

    /// Parent, grandparent, ... up to the topmost ancestor.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Children in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants, depth-first pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Children sorted by ascending z. Equal z keeps insertion order.
    pub fn children_by_z(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.children(id).to_vec();
        children.sort_by_key(|&child| self.base(child).map(|b| b.z()).unwrap_or_default());
        children
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Append `child` to `parent` and re-run the parent's layout.
    ///
    /// A child that already has a parent is moved.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(child)?;
        if self.node(parent)?.layout.is_none() {
            return Err(Error::NotAContainer(parent));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(Error::WouldCycle { parent, child });
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        debug!(%parent, %child, "added child");

        self.recalculate_layout(parent)
    }

    /// Detach `child` from `parent` and re-run the parent's layout.
    ///
    /// The child stays alive and can be added elsewhere or destroyed.
    /// Returns false if it was not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        let children = &mut self.node_mut(parent)?.children;
        let Some(position) = children.iter().position(|&c| c == child) else {
            return Ok(false);
        };
        children.remove(position);
        self.node_mut(child)?.parent = None;
        debug!(%parent, %child, "removed child");

        self.recalculate_layout(parent)?;
        Ok(true)
    }

    fn detach(&mut self, child: NodeId) -> Result<()> {
        if let Some(parent) = self.node(child)?.parent {
            self.remove_child(parent, child)?;
        }
        Ok(())
    }

    /// Detach a subtree and destroy every component in it, children first.
    ///
    /// Each component's `destroy()` runs before its slot is freed, releasing
    /// state bindings and cancelling owned tasks.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        self.detach(id)?;

        let mut doomed = self.descendants(id);
        doomed.insert(0, id);
        for &current in doomed.iter().rev() {
            let slot = &mut self.slots[current.index()];
            if let Some(mut node) = slot.node.take() {
                node.component.destroy();
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index() as u32);
            }
        }

        debug!(%id, count = doomed.len(), "destroyed subtree");
        Ok(())
    }

    /// Flip `has_focus` and notify the component if it changed.
    pub(crate) fn set_focus(&mut self, id: NodeId, focused: bool) -> bool {
        let Ok(node) = self.node_mut(id) else {
            return false;
        };
        if node.component.base().has_focus() == focused {
            return true;
        }
        node.component.base_mut().set_focus(focused);
        node.component.focus_changed(focused);
        true
    }

    // -------------------------------------------------------------------------
    // Layout & Drawing
    // -------------------------------------------------------------------------

    /// Run the container's flow strategy over its children.
    ///
    /// Leaves and empty containers are left untouched.
    pub fn recalculate_layout(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let Some(spec) = node.layout else {
            return Ok(());
        };
        if node.children.is_empty() {
            return Ok(());
        }
        let frame = LayoutFrame::new(node.component.base(), &spec);
        let children = node.children.clone();

        // Lift each child out of its slot so the bases can be borrowed
        // mutably side by side; they go back once the pass is done.
        let mut lifted: Vec<(usize, Node)> = Vec::with_capacity(children.len());
        for child in &children {
            let node = self
                .slots
                .get_mut(child.index())
                .filter(|slot| slot.generation == child.generation())
                .and_then(|slot| slot.node.take());
            if let Some(node) = node {
                lifted.push((child.index(), node));
            }
        }

        {
            let mut bases: Vec<&mut ComponentBase> = lifted
                .iter_mut()
                .map(|(_, node)| node.component.base_mut())
                .collect();
            trace!(%id, children = bases.len(), ?spec, "layout pass");
            spec.direction.strategy().layout(&frame, &mut bases);
        }

        for (index, node) in lifted {
            self.slots[index].node = Some(node);
        }
        Ok(())
    }

    /// Draw a component. Containers lay out first, then composite their
    /// children by ascending z, clipped to their own bounds.
    pub fn draw(&mut self, id: NodeId) -> Result<Grid> {
        self.recalculate_layout(id)?;
        let mut grid = self.node(id)?.component.draw();

        for child in self.children_by_z(id) {
            let child_grid = self.draw(child)?;
            let base = self.base(child)?;
            grid.blit(&child_grid, base.x(), base.y(), Some(base.transparent()));
        }
        Ok(grid)
    }

    /// Position of `id` relative to its topmost ancestor's origin.
    pub fn absolute_origin(&self, id: NodeId) -> Result<(i32, i32)> {
        let base = self.base(id)?;
        let mut origin = (base.x(), base.y());
        for ancestor in self.ancestors(id) {
            let b = self.base(ancestor)?;
            origin.0 += b.x();
            origin.1 += b.y();
        }
        Ok(origin)
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("free", &self.free.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Block, ComponentProps};
    use crate::state::state;

    fn block(props: ComponentProps) -> Block {
        Block::new(props).unwrap()
    }

    fn filled(width: u16, height: u16, fill: char) -> Block {
        block(ComponentProps {
            fill,
            ..ComponentProps::sized(width, height)
        })
    }

    #[test]
    fn test_insert_and_access() {
        let mut tree = Tree::new();
        let id = tree.insert(filled(2, 2, 'a'));
        assert!(tree.contains(id));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.base(id).unwrap().fill(), 'a');
        assert_eq!(tree.capabilities(id), Capabilities::DRAWABLE);
    }

    #[test]
    fn test_stale_handle_after_destroy() {
        let mut tree = Tree::new();
        let old = tree.insert(filled(1, 1, 'a'));
        tree.destroy(old).unwrap();
        let new = tree.insert(filled(1, 1, 'b'));

        assert_eq!(old.index(), new.index());
        assert!(!tree.contains(old));
        assert!(matches!(tree.base(old), Err(Error::UnknownNode(_))));
        assert_eq!(tree.base(new).unwrap().fill(), 'b');
    }

    #[test]
    fn test_add_child_requires_container() {
        let mut tree = Tree::new();
        let leaf = tree.insert(filled(1, 1, 'a'));
        let other = tree.insert(filled(1, 1, 'b'));
        assert!(matches!(
            tree.add_child(leaf, other),
            Err(Error::NotAContainer(_))
        ));
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut tree = Tree::new();
        let outer = tree.insert_layout(filled(4, 4, ' '), LayoutSpec::column());
        let inner = tree.insert_layout(filled(2, 2, ' '), LayoutSpec::column());
        tree.add_child(outer, inner).unwrap();

        assert!(matches!(tree.add_child(inner, outer), Err(Error::WouldCycle { .. })));
        assert!(matches!(tree.add_child(outer, outer), Err(Error::WouldCycle { .. })));
    }

    #[test]
    fn test_add_child_moves_between_parents() {
        let mut tree = Tree::new();
        let a = tree.insert_layout(filled(4, 4, ' '), LayoutSpec::column());
        let b = tree.insert_layout(filled(4, 4, ' '), LayoutSpec::column());
        let leaf = tree.insert(filled(1, 1, 'x'));

        tree.add_child(a, leaf).unwrap();
        tree.add_child(b, leaf).unwrap();

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[leaf]);
        assert_eq!(tree.parent(leaf), Some(b));
    }

    #[test]
    fn test_remove_child_keeps_component() {
        let mut tree = Tree::new();
        let parent = tree.insert_layout(filled(4, 4, ' '), LayoutSpec::column());
        let leaf = tree.insert(filled(1, 1, 'x'));
        tree.add_child(parent, leaf).unwrap();

        assert!(tree.remove_child(parent, leaf).unwrap());
        assert!(!tree.remove_child(parent, leaf).unwrap());
        assert!(tree.contains(leaf));
        assert_eq!(tree.parent(leaf), None);
    }

    #[test]
    fn test_descendants_are_pre_order() {
        let mut tree = Tree::new();
        let root = tree.insert_layout(filled(9, 9, ' '), LayoutSpec::column());
        let a = tree.insert_layout(filled(3, 3, ' '), LayoutSpec::row());
        let a1 = tree.insert(filled(1, 1, ' '));
        let a2 = tree.insert(filled(1, 1, ' '));
        let b = tree.insert(filled(1, 1, ' '));
        tree.add_child(root, a).unwrap();
        tree.add_child(a, a1).unwrap();
        tree.add_child(a, a2).unwrap();
        tree.add_child(root, b).unwrap();

        assert_eq!(tree.descendants(root), vec![a, a1, a2, b]);
        assert_eq!(tree.ancestors(a2).collect::<Vec<_>>(), vec![a, root]);
    }

    #[test]
    fn test_draw_composites_by_z_and_clips() {
        let mut tree = Tree::new();
        let root = tree.insert_layout(filled(4, 2, '.'), LayoutSpec::column());
        let high = tree.insert(block(ComponentProps {
            fixed: true,
            z: 2,
            fill: 'H',
            ..ComponentProps::sized(2, 1)
        }));
        let low = tree.insert(block(ComponentProps {
            fixed: true,
            x: 1,
            fill: 'L',
            ..ComponentProps::sized(9, 1)
        }));
        tree.add_child(root, high).unwrap();
        tree.add_child(root, low).unwrap();

        let grid = tree.draw(root).unwrap();
        assert_eq!(grid.to_lines(), vec!["HHLL", "...."]);
    }

    #[test]
    fn test_draw_empty_bordered_container() {
        let mut tree = Tree::new();
        let root = tree.insert_layout(
            block(ComponentProps {
                border: true,
                ..ComponentProps::sized(4, 3)
            }),
            LayoutSpec::row().fit(),
        );

        assert_eq!(tree.draw(root).unwrap().to_lines(), vec!["╭──╮", "│  │", "╰──╯"]);
    }

    #[test]
    fn test_layout_leaves_unrelated_nodes_in_place() {
        let mut tree = Tree::new();
        let root = tree.insert_layout(filled(6, 4, ' '), LayoutSpec::column().fit());
        let strays: Vec<NodeId> = (0..50).map(|_| tree.insert(filled(1, 1, 's'))).collect();
        let a = tree.insert(filled(1, 1, 'a'));
        let b = tree.insert(filled(1, 1, 'b'));
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.recalculate_layout(root).unwrap();

        assert_eq!(tree.len(), 53);
        assert!(strays.iter().all(|&s| tree.contains(s) && tree.base(s).unwrap().width() == 1));
        assert_eq!((tree.base(a).unwrap().width(), tree.base(a).unwrap().height()), (1, 2));
        assert_eq!(tree.base(b).unwrap().y(), 2);
        assert_eq!(tree.children(root), &[a, b]);
    }

    #[test]
    fn test_draw_honours_transparency() {
        let mut tree = Tree::new();
        let root = tree.insert_layout(filled(3, 1, '#'), LayoutSpec::row());
        let hole = tree.insert(block(ComponentProps {
            fill: '~',
            transparent: '~',
            ..ComponentProps::sized(3, 1)
        }));
        tree.add_child(root, hole).unwrap();

        assert_eq!(tree.draw(root).unwrap().to_lines(), vec!["###"]);
    }

    #[test]
    fn test_destroy_releases_subtree() {
        let value = state(0);
        let mut tree = Tree::new();
        let root = tree.insert_layout(filled(4, 4, ' '), LayoutSpec::column());
        let panel = tree.insert_layout(filled(4, 2, ' '), LayoutSpec::row());
        let mut leaf = filled(1, 1, ' ');
        leaf.base_mut().bind(&value, |_| {});
        let leaf = tree.insert(leaf);
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, leaf).unwrap();
        assert_eq!(value.listener_count(), 1);

        tree.destroy(panel).unwrap();

        assert_eq!(value.listener_count(), 0);
        assert!(!tree.contains(panel));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_absolute_origin_sums_ancestors() {
        let mut tree = Tree::new();
        let root = tree.insert_layout(
            block(ComponentProps {
                border: true,
                ..ComponentProps::sized(10, 10)
            }),
            LayoutSpec::column(),
        );
        let panel = tree.insert_layout(
            block(ComponentProps {
                border: true,
                height: Some(6),
                ..Default::default()
            }),
            LayoutSpec::column(),
        );
        let leaf = tree.insert(block(ComponentProps {
            height: Some(1),
            ..Default::default()
        }));
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, leaf).unwrap();
        tree.recalculate_layout(panel).unwrap();

        assert_eq!(tree.absolute_origin(leaf).unwrap(), (2, 2));
        assert_eq!(tree.base(leaf).unwrap().width(), 6);
    }
}
