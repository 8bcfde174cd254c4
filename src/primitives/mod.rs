//! Primitives - Component building blocks.
//!
//! - [`Component`] - the drawable contract every node implements
//! - [`ComponentBase`] - geometry, border/label chrome and lifecycle
//! - [`Block`] - plain component, also the usual backing for containers
//! - [`Text`] - static or state-backed text
//!
//! Concrete widgets (buttons, inputs, lists) live outside the core and only
//! rely on `draw()`, `handle_event()` and the base fields.

mod types;
mod component;
mod block;
mod text;

pub use types::*;
pub use component::{Component, ComponentBase};
pub use block::Block;
pub use text::{Content, Text};
