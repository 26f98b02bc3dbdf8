//! Strongly-typed identifiers and coordinate types.

use std::fmt;

/// Number of steps applied since the grid was last reset or resized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one board lifetime.
///
/// Bumped every time the grid is reset or resized, so that snapshot
/// consumers can distinguish "a later generation of the same board"
/// from "a different board that happens to share a tick number".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridEpoch(pub u64);

impl GridEpoch {
    /// The epoch after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for GridEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GridEpoch {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A cell position as `(column, row)`.
///
/// Column grows to the right, row grows downwards, matching display
/// coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Horizontal index, `0..columns`.
    pub col: u32,
    /// Vertical index, `0..rows`.
    pub row: u32,
}

impl CellCoord {
    /// Create a coordinate from `(col, row)`.
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((col, row): (u32, u32)) -> Self {
        Self { col, row }
    }
}

/// A pointer position in display coordinates.
///
/// Signed because pointer events near or outside the window edge can
/// report negative positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal pixel offset from the left edge.
    pub x: i32,
    /// Vertical pixel offset from the top edge.
    pub y: i32,
}

impl PixelPoint {
    /// Create a point from `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_next_saturates() {
        assert_eq!(TickId(3).next(), TickId(4));
        assert_eq!(TickId(u64::MAX).next(), TickId(u64::MAX));
    }

    #[test]
    fn coord_orders_by_column_then_row() {
        let mut coords = vec![CellCoord::new(1, 0), CellCoord::new(0, 5), CellCoord::new(0, 1)];
        coords.sort();
        assert_eq!(
            coords,
            vec![CellCoord::new(0, 1), CellCoord::new(0, 5), CellCoord::new(1, 0)]
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(CellCoord::new(2, 7).to_string(), "(2, 7)");
        assert_eq!(PixelPoint::new(-1, 4).to_string(), "(-1, 4)");
        assert_eq!(GridEpoch(9).to_string(), "9");
    }
}
