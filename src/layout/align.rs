//! Alignment resolution.
//!
//! An alignment is either a 9-point keyword (`top-left` … `bottom-right`,
//! plus the bare `left`/`center`/`right`/`top`/`bottom`) or an explicit pair
//! of per-axis values, each a keyword or a fixed offset. Resolution is pure:
//! given the container extent and the item extent it returns the item's
//! offset inside the container.

use std::convert::Infallible;
use std::str::FromStr;

// =============================================================================
// Axis Alignment
// =============================================================================

/// Alignment along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisAlign {
    #[default]
    Start,
    Center,
    End,
    /// Fixed offset in cells from the container's start edge.
    Offset(i32),
}

impl AxisAlign {
    /// Parse a single-axis keyword. Unrecognized keywords align to the start.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "center" | "middle" => Self::Center,
            "right" | "bottom" | "end" => Self::End,
            _ => Self::Start,
        }
    }

    /// Offset of an item of size `item` inside a container of size `container`.
    ///
    /// `End` and `Center` go negative when the item is larger than the
    /// container; the result is not clamped.
    #[inline]
    pub fn resolve(self, container: i32, item: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (container - item).div_euclid(2),
            Self::End => container - item,
            Self::Offset(offset) => offset,
        }
    }
}

impl From<i32> for AxisAlign {
    fn from(offset: i32) -> Self {
        Self::Offset(offset)
    }
}

/// Resolve a single-axis keyword directly.
pub fn resolve_keyword(keyword: &str, container: i32, item: i32) -> i32 {
    AxisAlign::from_keyword(keyword).resolve(container, item)
}

// =============================================================================
// Two-Axis Alignment
// =============================================================================

/// Horizontal and vertical alignment of an item inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Align {
    pub x: AxisAlign,
    pub y: AxisAlign,
}

impl Align {
    pub const TOP_LEFT: Self = Self::new(AxisAlign::Start, AxisAlign::Start);
    pub const TOP: Self = Self::new(AxisAlign::Center, AxisAlign::Start);
    pub const TOP_RIGHT: Self = Self::new(AxisAlign::End, AxisAlign::Start);
    pub const LEFT: Self = Self::new(AxisAlign::Start, AxisAlign::Center);
    pub const CENTER: Self = Self::new(AxisAlign::Center, AxisAlign::Center);
    pub const RIGHT: Self = Self::new(AxisAlign::End, AxisAlign::Center);
    pub const BOTTOM_LEFT: Self = Self::new(AxisAlign::Start, AxisAlign::End);
    pub const BOTTOM: Self = Self::new(AxisAlign::Center, AxisAlign::End);
    pub const BOTTOM_RIGHT: Self = Self::new(AxisAlign::End, AxisAlign::End);

    pub const fn new(x: AxisAlign, y: AxisAlign) -> Self {
        Self { x, y }
    }

    /// Parse a 9-point keyword such as `top-left`, `center` or `bottom`.
    ///
    /// A bare edge keyword centers the other axis (`top` is top-center).
    /// Anything unrecognized resolves to top-left.
    pub fn keyword(keyword: &str) -> Self {
        let mut x = AxisAlign::Center;
        let mut y = AxisAlign::Center;
        for part in keyword.trim().split('-') {
            match part {
                "left" => x = AxisAlign::Start,
                "right" => x = AxisAlign::End,
                "top" => y = AxisAlign::Start,
                "bottom" => y = AxisAlign::End,
                "center" | "middle" => {}
                _ => return Self::TOP_LEFT,
            }
        }
        Self { x, y }
    }

    /// Offset of an item inside a container, as `(x, y)`.
    pub fn resolve(&self, container: (u16, u16), item: (u16, u16)) -> (i32, i32) {
        (
            self.x.resolve(container.0 as i32, item.0 as i32),
            self.y.resolve(container.1 as i32, item.1 as i32),
        )
    }
}

impl FromStr for Align {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::keyword(s))
    }
}

impl From<&str> for Align {
    fn from(keyword: &str) -> Self {
        Self::keyword(keyword)
    }
}

// =============================================================================
// Tests
// =============================================================================
