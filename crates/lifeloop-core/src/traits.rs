//! Seams between the simulation core and the presentation layer.

use crate::cell::CellState;
use crate::error::RenderError;
use crate::id::{CellCoord, GridEpoch, TickId};

/// The presentation layer's redraw hook.
///
/// The loop calls [`request_redraw`](Presenter::request_redraw) at most
/// once per render interval. Implementations typically schedule a
/// repaint and later pull the current snapshot; they never receive grid
/// data through this call.
///
/// Errors (and panics) are contained by the loop: a failed redraw is
/// logged and the simulation keeps running.
pub trait Presenter: Send + Sync {
    /// Ask the presentation layer to repaint when convenient.
    fn request_redraw(&self) -> Result<(), RenderError>;
}

impl<P: Presenter + ?Sized> Presenter for std::sync::Arc<P> {
    fn request_redraw(&self) -> Result<(), RenderError> {
        (**self).request_redraw()
    }
}

/// Read-only access to one generation of the grid.
///
/// Implemented by published snapshots and by the live grid, so that
/// rendering helpers and test assertions work on either.
pub trait GridView {
    /// Grid width in cells.
    fn columns(&self) -> u32;

    /// Grid height in cells.
    fn rows(&self) -> u32;

    /// State at `coord`, or `None` if it lies outside the grid.
    fn state_at(&self, coord: CellCoord) -> Option<CellState>;

    /// Steps applied since the last reset or resize.
    fn tick_id(&self) -> TickId;

    /// Board lifetime this generation belongs to.
    fn epoch(&self) -> GridEpoch;

    /// Total number of cells.
    fn cell_count(&self) -> usize {
        (self.columns() as usize) * (self.rows() as usize)
    }

    /// Whether the cell at `coord` is alive. Out-of-range is `false`.
    fn is_alive(&self, coord: CellCoord) -> bool {
        self.state_at(coord).is_some_and(CellState::is_alive)
    }
}
