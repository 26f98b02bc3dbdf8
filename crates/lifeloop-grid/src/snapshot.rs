//! Immutable point-in-time copies of the grid.

use std::fmt;

use lifeloop_core::{CellCoord, CellState, GridEpoch, GridView, TickId};
use lifeloop_space::Geometry;

/// An owned copy of one generation, safe to hand to other threads.
///
/// Carries the staged edits too, so a paused presenter can highlight
/// cells the user has clicked but that are not yet applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSnapshot {
    geometry: Geometry,
    states: Vec<CellState>,
    pending: Vec<CellCoord>,
    tick: TickId,
    epoch: GridEpoch,
    live: usize,
    rule: String,
}

impl GridSnapshot {
    pub(crate) fn new(
        geometry: Geometry,
        states: Vec<CellState>,
        pending: Vec<CellCoord>,
        tick: TickId,
        epoch: GridEpoch,
        rule: String,
    ) -> Self {
        let live = states.iter().filter(|s| s.is_alive()).count();
        Self {
            geometry,
            states,
            pending,
            tick,
            epoch,
            live,
            rule,
        }
    }

    /// Dimensions of the captured grid.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Row-major states.
    pub fn states(&self) -> &[CellState] {
        &self.states
    }

    /// Cells with a staged toggle, in selection order.
    pub fn pending(&self) -> &[CellCoord] {
        &self.pending
    }

    /// Number of alive cells.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Name of the rule that produced this generation.
    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    /// Coordinates of alive cells, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_alive())
            .map(|(i, _)| self.geometry.coord_of(i))
    }

    /// Text rendering, one line per row.
    ///
    /// `#` alive, `+` dying, `.` dead. Staged cells show as `*`.
    pub fn to_ascii(&self) -> String {
        self.to_string()
    }
}

impl GridView for GridSnapshot {
    fn columns(&self) -> u32 {
        self.geometry.columns()
    }

    fn rows(&self) -> u32 {
        self.geometry.rows()
    }

    fn state_at(&self, coord: CellCoord) -> Option<CellState> {
        self.geometry.index_of(coord).map(|i| self.states[i])
    }

    fn tick_id(&self) -> TickId {
        self.tick
    }

    fn epoch(&self) -> GridEpoch {
        self.epoch
    }
}

impl fmt::Display for GridSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.geometry.columns() as usize;
        if columns == 0 {
            return Ok(());
        }
        for (row, chunk) in self.states.chunks(columns).enumerate() {
            for (col, state) in chunk.iter().enumerate() {
                let coord = CellCoord::new(col as u32, row as u32);
                let glyph = if self.pending.contains(&coord) {
                    '*'
                } else {
                    match state {
                        CellState::Alive => '#',
                        CellState::Dying(_) => '+',
                        CellState::Dead => '.',
                    }
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
