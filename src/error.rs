//! Error types.
//!
//! Construction problems are programmer errors and surface as `Err` so the
//! caller can abort startup with `?`. Clipping and empty focus contexts are
//! not errors and never show up here.

use thiserror::Error;

use crate::types::NodeId;

/// Errors produced by spark-cells.
#[derive(Debug, Error)]
pub enum Error {
    /// A component was configured with a zero width or height.
    #[error("invalid component size {width}x{height}: both dimensions must be at least 1")]
    InvalidSize { width: u16, height: u16 },

    /// A display-surface sink could not find its target.
    #[error("render target `{0}` not found")]
    MissingRenderTarget(String),

    /// The handle does not refer to a live component.
    #[error("unknown component {0}")]
    UnknownNode(NodeId),

    /// Children can only be added to nodes with a layout.
    #[error("component {0} is not a container")]
    NotAContainer(NodeId),

    /// Adding the child would make a node its own ancestor.
    #[error("cannot add {child} under {parent}: it is an ancestor of the parent")]
    WouldCycle { parent: NodeId, child: NodeId },

    /// Writing a frame to the sink failed.
    #[error("render sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
