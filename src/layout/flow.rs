//! Row/Column flow layout.
//!
//! # Algorithm
//!
//! A single pass over the children in insertion order:
//!
//! 1. Skip `fixed` children entirely (no space reserved)
//! 2. With `fit`, give each flowing child an equal share of the flow-axis
//!    extent (floor division, the remainder stays unused)
//! 3. Fill an auto-sized cross axis with the full inner cross extent. This
//!    happens with or without `fit`: a fitted child whose cross axis is
//!    auto gets both the share and the fill
//! 4. Align on the cross axis, place at the cursor, advance the cursor by
//!    the child's flow-axis size plus `gap`
//!
//! Every child must be sizeable from the parent alone; there is no
//! iteration to a fixed point. Children that overflow are not rejected,
//! compositing clips them.

use tracing::trace;

use crate::primitives::ComponentBase;
use super::align::Align;

// =============================================================================
// Configuration
// =============================================================================

/// Flow axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children left to right.
    Row,
    /// Children top to bottom.
    #[default]
    Column,
}

impl Direction {
    /// The strategy implementing this direction.
    pub fn strategy(self) -> &'static dyn FlowStrategy {
        match self {
            Self::Row => &Row,
            Self::Column => &Column,
        }
    }
}

/// Layout options of a container node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSpec {
    pub direction: Direction,
    /// Split the flow-axis extent evenly among flowing children.
    pub fit: bool,
    /// Empty cells between consecutive flowing children.
    pub gap: u16,
}

impl LayoutSpec {
    pub fn row() -> Self {
        Self {
            direction: Direction::Row,
            ..Self::default()
        }
    }

    pub fn column() -> Self {
        Self {
            direction: Direction::Column,
            ..Self::default()
        }
    }

    pub fn fit(mut self) -> Self {
        self.fit = true;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }
}

/// Snapshot of the parent geometry a strategy needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutFrame {
    pub inner_width: u16,
    pub inner_height: u16,
    /// Offset of the content area from the parent's origin.
    pub padding: u16,
    /// Cross-axis alignment for children that don't set their own.
    pub align: Align,
    pub fit: bool,
    pub gap: u16,
}

impl LayoutFrame {
    pub fn new(parent: &ComponentBase, spec: &LayoutSpec) -> Self {
        let (inner_width, inner_height) = parent.inner_size();
        Self {
            inner_width,
            inner_height,
            padding: parent.padding(),
            align: parent.align().unwrap_or_default(),
            fit: spec.fit,
            gap: spec.gap,
        }
    }
}

// =============================================================================
// Strategies
// =============================================================================

/// Positions and sizes a container's children.
pub trait FlowStrategy {
    fn layout(&self, parent: &LayoutFrame, children: &mut [&mut ComponentBase]);
}

/// Packs children left to right, aligning them vertically.
#[derive(Debug, Clone, Copy, Default)]
pub struct Row;

/// Packs children top to bottom, aligning them horizontally.
#[derive(Debug, Clone, Copy, Default)]
pub struct Column;

impl FlowStrategy for Row {
    fn layout(&self, parent: &LayoutFrame, children: &mut [&mut ComponentBase]) {
        flow(Axis::Horizontal, parent, children);
    }
}

impl FlowStrategy for Column {
    fn layout(&self, parent: &LayoutFrame, children: &mut [&mut ComponentBase]) {
        flow(Axis::Vertical, parent, children);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn flow(axis: Axis, parent: &LayoutFrame, children: &mut [&mut ComponentBase]) {
    let flowing = children.iter().filter(|c| !c.fixed()).count();
    if flowing == 0 {
        return;
    }

    let (main_extent, cross_extent) = match axis {
        Axis::Horizontal => (parent.inner_width, parent.inner_height),
        Axis::Vertical => (parent.inner_height, parent.inner_width),
    };
    // Divide in usize: the child count may exceed u16::MAX.
    let share = parent.fit.then(|| (main_extent as usize / flowing) as u16);
    let pad = parent.padding as i32;
    let mut cursor = pad;

    for child in children.iter_mut().filter(|c| !c.fixed()) {
        match axis {
            Axis::Horizontal => {
                let height = child.auto_height().then_some(cross_extent);
                child.assign_size(share, height);
            }
            Axis::Vertical => {
                let width = child.auto_width().then_some(cross_extent);
                child.assign_size(width, share);
            }
        }

        let align = child.align().unwrap_or(parent.align);
        let (x, y, main_size) = match axis {
            Axis::Horizontal => {
                let y = pad + align.y.resolve(cross_extent as i32, child.height() as i32);
                (cursor, y, child.width())
            }
            Axis::Vertical => {
                let x = pad + align.x.resolve(cross_extent as i32, child.width() as i32);
                (x, cursor, child.height())
            }
        };
        child.set_position(x, y);
        trace!(?axis, x, y, width = child.width(), height = child.height(), "placed child");

        cursor += main_size as i32 + parent.gap as i32;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::AxisAlign;
    use crate::primitives::ComponentProps;

    fn base(props: ComponentProps) -> ComponentBase {
        ComponentBase::new(props).unwrap()
    }

    fn frame(width: u16, height: u16, border: bool, spec: LayoutSpec) -> LayoutFrame {
        LayoutFrame::new(
            &base(ComponentProps {
                border,
                ..ComponentProps::sized(width, height)
            }),
            &spec,
        )
    }

    fn run(direction: Direction, parent: &LayoutFrame, children: &mut [ComponentBase]) {
        let mut refs: Vec<&mut ComponentBase> = children.iter_mut().collect();
        direction.strategy().layout(parent, &mut refs);
    }

    #[test]
    fn test_column_stacks_and_fills_width() {
        let parent = frame(12, 11, true, LayoutSpec::column());
        let mut kids: Vec<ComponentBase> = (0..3)
            .map(|_| base(ComponentProps { height: Some(3), ..Default::default() }))
            .collect();
        run(Direction::Column, &parent, &mut kids);

        for (n, kid) in kids.iter().enumerate() {
            assert_eq!(kid.y(), 1 + 3 * n as i32);
            assert_eq!(kid.x(), 1);
            assert_eq!(kid.width(), 10);
        }
    }

    #[test]
    fn test_row_packs_left_to_right() {
        let parent = frame(20, 4, false, LayoutSpec::row());
        let mut kids = vec![
            base(ComponentProps { width: Some(5), ..Default::default() }),
            base(ComponentProps { width: Some(7), ..Default::default() }),
        ];
        run(Direction::Row, &parent, &mut kids);

        assert_eq!((kids[0].x(), kids[0].y()), (0, 0));
        assert_eq!((kids[1].x(), kids[1].y()), (5, 0));
        assert_eq!(kids[1].height(), 4);
    }

    #[test]
    fn test_fit_floors_and_leaves_remainder() {
        for (inner, expected) in [(9u16, 3u16), (10, 3)] {
            let parent = frame(4, inner, false, LayoutSpec::column().fit());
            let mut kids: Vec<ComponentBase> =
                (0..3).map(|_| base(ComponentProps::default())).collect();
            run(Direction::Column, &parent, &mut kids);

            let heights: Vec<u16> = kids.iter().map(|k| k.height()).collect();
            assert_eq!(heights, vec![expected; 3]);
            assert_eq!(kids[2].y(), 2 * expected as i32);
        }
    }

    #[test]
    fn test_fixed_children_are_skipped() {
        let parent = frame(10, 10, false, LayoutSpec::column().fit());
        let mut kids = vec![
            base(ComponentProps {
                fixed: true,
                x: 7,
                y: 8,
                ..ComponentProps::sized(2, 2)
            }),
            base(ComponentProps::default()),
            base(ComponentProps::default()),
        ];
        run(Direction::Column, &parent, &mut kids);

        assert_eq!((kids[0].x(), kids[0].y()), (7, 8));
        assert_eq!((kids[0].width(), kids[0].height()), (2, 2));
        assert_eq!(kids[1].height(), 5);
        assert_eq!(kids[2].y(), 5);
    }

    #[test]
    fn test_only_fixed_children_is_noop() {
        let parent = frame(10, 10, false, LayoutSpec::row().fit());
        let mut kids = vec![base(ComponentProps {
            fixed: true,
            ..ComponentProps::sized(3, 3)
        })];
        run(Direction::Row, &parent, &mut kids);
        assert_eq!(kids[0].width(), 3);
    }

    #[test]
    fn test_cross_axis_alignment() {
        let mut parent = frame(10, 6, false, LayoutSpec::column());
        parent.align = Align::CENTER;
        let mut kids = vec![
            base(ComponentProps::sized(4, 1)),
            base(ComponentProps {
                align: Some(Align::new(AxisAlign::End, AxisAlign::Start)),
                ..ComponentProps::sized(4, 1)
            }),
            base(ComponentProps::sized(14, 1)),
        ];
        run(Direction::Column, &parent, &mut kids);

        assert_eq!(kids[0].x(), 3);
        assert_eq!(kids[1].x(), 6);
        assert_eq!(kids[2].x(), -2);
    }

    #[test]
    fn test_gap_between_children() {
        let parent = frame(3, 20, false, LayoutSpec::column().gap(2));
        let mut kids: Vec<ComponentBase> = (0..3)
            .map(|_| base(ComponentProps { height: Some(2), ..Default::default() }))
            .collect();
        run(Direction::Column, &parent, &mut kids);

        let ys: Vec<i32> = kids.iter().map(|k| k.y()).collect();
        assert_eq!(ys, vec![0, 4, 8]);
    }

    #[test]
    fn test_fit_with_more_children_than_u16_cells() {
        let parent = frame(2, 100, false, LayoutSpec::column().fit());
        let count = u16::MAX as usize + 1;
        let mut kids: Vec<ComponentBase> =
            (0..count).map(|_| base(ComponentProps::default())).collect();
        run(Direction::Column, &parent, &mut kids);

        // A zero share is clamped to the one-cell minimum.
        assert!(kids.iter().all(|k| k.height() == 1));
        assert_eq!(kids[count - 1].y(), (count - 1) as i32);
    }

    #[test]
    fn test_oversized_child_is_kept() {
        let parent = frame(5, 5, false, LayoutSpec::column());
        let mut kids = vec![base(ComponentProps::sized(9, 9))];
        run(Direction::Column, &parent, &mut kids);
        assert_eq!((kids[0].width(), kids[0].height()), (9, 9));
    }
}
