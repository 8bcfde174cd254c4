//! Screen compositing.
//!
//! The whole tree is flattened (the root plus every descendant), stably
//! sorted by z, and each node's freshly drawn grid is copied onto a blank
//! screen at the node's absolute position. Later nodes paint over earlier
//! ones, except where a cell equals the node's transparency sentinel.
//! Anything outside the screen is clipped.

use tracing::trace;

use crate::engine::Tree;
use crate::error::Result;
use crate::types::{Grid, NodeId};

/// Nodes in bottom-to-top paint order: ascending z, ties in pre-order.
pub fn paint_order(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    let mut order = tree.descendants(root);
    order.insert(0, root);
    order.sort_by_key(|&id| tree.base(id).map(|b| b.z()).unwrap_or_default());
    order
}

/// Compose a `width` x `height` screen from the tree under `root`.
pub fn composite(tree: &mut Tree, root: NodeId, width: u16, height: u16) -> Result<Grid> {
    let mut screen = Grid::new(width, height, ' ');

    for id in paint_order(tree, root) {
        let grid = tree.draw(id)?;
        let (x, y) = tree.absolute_origin(id)?;
        let transparent = tree.base(id)?.transparent();
        trace!(%id, x, y, "compositing");
        screen.blit(&grid, x, y, Some(transparent));
    }
    Ok(screen)
}
