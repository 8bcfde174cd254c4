//! Core types for spark-cells.
//!
//! These types define the foundation that everything builds on: the
//! character grid every component draws into, the handles the component
//! arena hands out, and the capability tags that decide how a node takes
//! part in layout, compositing and focus.

use std::fmt;

// =============================================================================
// Transparency
// =============================================================================

/// Default transparency sentinel.
///
/// A cell holding the owning component's sentinel is skipped during
/// compositing, so whatever was painted underneath stays visible.
pub const TRANSPARENT: char = '\0';

// =============================================================================
// Grid - The atomic unit of rendering
// =============================================================================

/// A 2D grid of characters.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`.
/// Every `draw()` returns one of these, and the application composites them
/// into a single screen-sized grid for the render sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<char>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    pub fn new(width: u16, height: u16, fill: char) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if signed coordinates fall inside the grid.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Get a cell (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        if self.in_bounds(x as i32, y as i32) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set a cell. Out-of-bounds writes are dropped.
    ///
    /// Returns true if the cell was written.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, ch: char) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x as u16, y as u16);
        self.cells[idx] = ch;
        true
    }

    /// Write a string left to right starting at (x, y), clipped to the grid.
    ///
    /// One character per cell.
    pub fn write_str(&mut self, x: i32, y: i32, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            self.set(x + offset as i32, y, ch);
        }
    }

    /// Get one row as a slice.
    pub fn row(&self, y: u16) -> Option<&[char]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // An empty cell vector yields no chunks, so the max(1) only guards
        // the zero-width case.
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Copy `src` into this grid with its top-left corner at (x, y).
    ///
    /// Cells landing outside this grid are silently dropped. When
    /// `transparent` is given, source cells equal to it leave the existing
    /// cell untouched.
    pub fn blit(&mut self, src: &Grid, x: i32, y: i32, transparent: Option<char>) {
        for (row, cells) in src.rows().enumerate() {
            let ty = y + row as i32;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            for (col, &ch) in cells.iter().enumerate() {
                if transparent == Some(ch) {
                    continue;
                }
                self.set(x + col as i32, ty, ch);
            }
        }
    }

    /// Render rows as strings. The default sentinel prints as a space.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|&c| if c == TRANSPARENT { ' ' } else { c })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lines().join("\n"))
    }
}

// =============================================================================
// Border Glyphs
// =============================================================================

/// The six glyphs that make up a box border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_right: char,
    pub bottom_left: char,
}

/// ─ │ ╭ ╮ ╯ ╰
pub const ROUNDED: BorderGlyphs = BorderGlyphs {
    horizontal: '─',
    vertical: '│',
    top_left: '╭',
    top_right: '╮',
    bottom_right: '╯',
    bottom_left: '╰',
};

// =============================================================================
// Node Handles
// =============================================================================

/// Handle to a component stored in a [`Tree`](crate::engine::Tree).
///
/// The generation guards against a recycled slot being mistaken for the
/// component that used to live there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

bitflags::bitflags! {
    /// What a node in the tree can do.
    ///
    /// Every node draws. Containers additionally own children and run a
    /// layout pass; focusable nodes receive keys from the focus manager.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Capabilities: u8 {
        const DRAWABLE = 1 << 0;
        const CONTAINER = 1 << 1;
        const FOCUSABLE = 1 << 2;
    }
}

// =============================================================================
// Tests
// =============================================================================
