//! Engine Module - component storage and hierarchy.
//!
//! The [`Tree`] arena owns every component. Handles ([`NodeId`]) are cheap
//! to copy and stay valid until the component is destroyed.
//!
//! [`NodeId`]: crate::types::NodeId

mod tree;

pub use tree::Tree;
