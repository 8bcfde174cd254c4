//! Pipeline
//!
//! Turns the component tree into frames:
//!
//! ```text
//! key / tick → App → layout pass → draw (per node) → composite → RenderSink
//! ```
//!
//! - **compose** - flatten, z-sort and composite the whole tree
//! - **app** - the application root: event routing, focus and render loop

pub mod app;
pub mod compose;

pub use app::{App, AppConfig};
pub use compose::{composite, paint_order};
