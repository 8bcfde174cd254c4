//! # spark-cells
//!
//! Character-cell UI framework for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive state.
//!
//! ## Architecture
//!
//! Components live in an arena ([`engine::Tree`]) and are addressed by
//! [`NodeId`]. Every node draws; nodes registered with a [`LayoutSpec`] are
//! containers that position their children with a Row or Column flow before
//! compositing them. The [`App`] root owns the tree, a [`FocusManager`] and
//! a [`RenderSink`], and recomposes the whole screen on every frame:
//!
//! ```text
//! key → App → FocusManager → Component::handle_event → render
//! render: layout → draw → z-sorted composite → RenderSink
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Grid`, `NodeId`, capability flags, border glyphs
//! - [`engine`] - the component arena
//! - [`primitives`] - the `Component` trait, `ComponentBase`, `Block`, `Text`
//! - [`layout`] - alignment and Row/Column flow strategies
//! - [`state`] - `State<T>`, focus, render scheduler, timers
//! - [`renderer`] - terminal, surface and memory sinks
//! - [`pipeline`] - compositing and the `App` root

pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, Result};

pub use engine::Tree;

pub use layout::{Align, AxisAlign, Direction, FlowStrategy, LayoutSpec};

pub use primitives::{Block, Cleanup, Component, ComponentBase, ComponentProps, Content, Text};

pub use renderer::{MemorySink, RenderSink, SurfaceHost, SurfaceSink, TerminalSink, TextSurface};

pub use state::{
    keyboard, state, FocusManager, RenderScheduler, State, Subscription, TaskHandle, Timers,
    Tween,
};

pub use pipeline::{composite, App, AppConfig};
