//! Cell state and the [`Cell`] entity owned by a grid.

use crate::id::CellCoord;

/// State of a single cell.
///
/// Two-state rules only ever produce [`Dead`](CellState::Dead) and
/// [`Alive`](CellState::Alive). Multi-state "Generations" rules use
/// [`Dying`](CellState::Dying) for the refractory countdown between
/// leaving the alive state and becoming dead again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Empty cell.
    #[default]
    Dead,
    /// Live cell.
    Alive,
    /// Refractory cell, `n` steps after leaving the alive state (`n >= 1`).
    Dying(u8),
}

impl CellState {
    /// Whether the cell is in the alive state.
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Whether the cell is dead.
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }

    /// The state an interactive edit moves this cell to.
    ///
    /// Alive cells die; dead and dying cells come alive.
    pub fn toggled(self) -> Self {
        match self {
            Self::Alive => Self::Dead,
            Self::Dead | Self::Dying(_) => Self::Alive,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

/// A grid entity: position, state and the staged-edit mark.
///
/// `marked` is set while the simulation is paused to stage a toggle
/// without mutating `state` mid-frame. The grid engine applies and
/// clears marks in one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Position in the grid.
    pub coord: CellCoord,
    /// Current state.
    pub state: CellState,
    /// Whether a toggle is staged for this cell.
    pub marked: bool,
}

impl Cell {
    /// A dead, unmarked cell at `coord`.
    pub fn dead(coord: CellCoord) -> Self {
        Self {
            coord,
            state: CellState::Dead,
            marked: false,
        }
    }

    /// Apply a staged toggle, if any. Returns `true` if the state changed.
    pub fn apply_mark(&mut self) -> bool {
        if !self.marked {
            return false;
        }
        self.marked = false;
        self.state = self.state.toggled();
        true
    }
}
