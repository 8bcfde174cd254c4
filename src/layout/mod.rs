//! Layout Module - alignment and Row/Column flow.
//!
//! Layout is a pure function of a parent's geometry and its children's
//! sizing flags. Containers carry a [`LayoutSpec`]; the tree snapshots the
//! parent into a [`LayoutFrame`] and hands the children's bases to the
//! [`FlowStrategy`] picked by its [`Direction`].
//!
//! # Example
//!
//! ```ignore
//! use spark_cells::layout::{LayoutSpec, Align};
//!
//! let list = tree.insert_layout(Block::new(props)?, LayoutSpec::column().gap(1));
//! let center: Align = "center".parse().unwrap();
//! ```

mod align;
mod flow;

pub use align::*;
pub use flow::*;
