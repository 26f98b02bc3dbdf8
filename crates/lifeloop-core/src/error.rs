//! Error types for the Lifeloop simulator.
//!
//! None of these are fatal to a running simulation: geometry anomalies
//! are clamped, out-of-bounds selections are ignored, and render
//! failures are logged by the loop and skipped.

use crate::id::{CellCoord, PixelPoint};

/// A display area or tile size that cannot describe a grid.
///
/// Returned by strict geometry constructors. The permissive
/// constructors used by the engine clamp instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A dimension was negative.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Which dimension.
        name: &'static str,
        /// The offending value.
        value: i64,
    },
    /// A dimension does not fit in `u32`.
    #[error("{name} {value} exceeds the maximum of {max}")]
    TooLarge {
        /// Which dimension.
        name: &'static str,
        /// The offending value.
        value: i64,
        /// Largest accepted value.
        max: u32,
    },
    /// The display would need more cells than a grid may hold.
    #[error("{columns}x{rows} grid exceeds the maximum of {max} cells")]
    TooManyCells {
        /// Columns the display would need.
        columns: u32,
        /// Rows the display would need.
        rows: u32,
        /// Largest accepted cell count.
        max: u64,
    },
}

/// A pointer position that does not resolve to a grid cell.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The point lies left of / above the grid, or resolves past its
    /// last column or row.
    #[error("pixel {point} is outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// The pointer position.
        point: PixelPoint,
        /// Grid width in cells.
        columns: u32,
        /// Grid height in cells.
        rows: u32,
    },
    /// A cell coordinate past the grid bounds.
    #[error("cell {coord} is outside the {columns}x{rows} grid")]
    CellOutOfBounds {
        /// The offending coordinate.
        coord: CellCoord,
        /// Grid width in cells.
        columns: u32,
        /// Grid height in cells.
        rows: u32,
    },
}

/// A redraw request the presentation layer could not honour.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The presentation surface is gone (window closed, context lost).
    #[error("presentation surface unavailable")]
    SurfaceLost,
    /// Any other presenter-side failure.
    #[error("redraw failed: {reason}")]
    Failed {
        /// Human-readable description.
        reason: String,
    },
}

/// A malformed rulestring such as `"B3/S23"`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// The string does not have the `B.../S...` shape.
    #[error("rulestring {input:?} is not of the form B<digits>/S<digits>[/C<states>]")]
    Malformed {
        /// The rejected input.
        input: String,
    },
    /// A neighbour count outside `0..=8`.
    #[error("neighbour count {digit} out of range 0..=8")]
    CountOutOfRange {
        /// The offending character.
        digit: char,
    },
    /// A Generations state count below 2 or above 255.
    #[error("generations state count {value} out of range 2..=255")]
    StateCountOutOfRange {
        /// The offending value.
        value: u32,
    },
}
