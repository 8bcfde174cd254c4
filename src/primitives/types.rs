//! Primitive types - Props and cleanup.
//!
//! `ComponentProps` is the construction contract every component consumes.
//! All fields are optional except width/height at the leaf level, and even
//! those may be left to the parent's flow layout.

use crate::layout::Align;
use crate::types::TRANSPARENT;

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function recorded by a component.
///
/// Run exactly once when the component is destroyed.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Component Props
// =============================================================================

/// Configuration consumed by every component.
///
/// ```ignore
/// let props = ComponentProps {
///     height: Some(3),
///     border: true,
///     label: Some("Name".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentProps {
    /// Width in cells. `None` lets the parent layout decide.
    pub width: Option<u16>,
    /// Height in cells. `None` lets the parent layout decide.
    pub height: Option<u16>,
    /// Text shown centered in the top row.
    pub label: Option<String>,
    /// `false` hides the label text; the border still reserves its row.
    pub show_label: bool,
    /// Draw a rounded box around the component.
    pub border: bool,
    /// Background character.
    pub fill: char,
    /// Alignment on the parent's cross axis. Falls back to the parent's.
    pub align: Option<Align>,
    /// Exempt from parent flow; keeps `x`/`y` as given.
    pub fixed: bool,
    pub x: i32,
    pub y: i32,
    /// Stacking order among siblings. Does not affect layout.
    pub z: i32,
    /// Receives keys from the focus manager.
    pub focusable: bool,
    /// Cells equal to this character are not composited.
    pub transparent: char,
}

impl Default for ComponentProps {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            label: None,
            show_label: true,
            border: false,
            fill: ' ',
            align: None,
            fixed: false,
            x: 0,
            y: 0,
            z: 0,
            focusable: false,
            transparent: TRANSPARENT,
        }
    }
}

impl ComponentProps {
    /// Props with an explicit size and defaults for everything else.
    pub fn sized(width: u16, height: u16) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}
