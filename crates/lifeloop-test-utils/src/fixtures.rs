//! Reusable grid fixtures.
//!
//! - [`engine_with`]: a Conway board of a given size with some cells alive
//! - [`live_coords`]: the alive cells of any [`GridView`], row-major
//! - [`FrozenRule`]: a rule under which nothing ever changes

use lifeloop_core::{CellCoord, CellState, GridView};
use lifeloop_grid::GridEngine;
use lifeloop_rule::{LifeLike, Rule};
use lifeloop_space::TileSize;

/// Tile size used by [`engine_with`], in pixels.
pub const FIXTURE_TILE: u32 = 10;

/// A `columns × rows` Conway board with `alive` cells set.
///
/// Tiles are [`FIXTURE_TILE`] pixels square, so the cell at `(c, r)` is
/// under pixel `(c * 10, r * 10)`. Coordinates outside the board are
/// skipped.
pub fn engine_with(columns: u32, rows: u32, alive: &[(u32, u32)]) -> GridEngine {
    let tile = i64::from(FIXTURE_TILE);
    let mut engine = GridEngine::new(
        i64::from(columns) * tile,
        i64::from(rows) * tile,
        TileSize::square(FIXTURE_TILE),
        Box::new(LifeLike::conway()),
    );
    for &(col, row) in alive {
        let _ = engine.set_cell(CellCoord::new(col, row), CellState::Alive);
    }
    engine
}

/// Alive cells of `view`, row-major.
pub fn live_coords(view: &impl GridView) -> Vec<CellCoord> {
    (0..view.rows())
        .flat_map(|row| (0..view.columns()).map(move |col| CellCoord::new(col, row)))
        .filter(|&c| view.is_alive(c))
        .collect()
}

/// Every cell keeps its state forever.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrozenRule;

impl Rule for FrozenRule {
    fn name(&self) -> &str {
        "frozen"
    }

    fn next_state(&self, current: CellState, _live: u8) -> CellState {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_with_places_cells_and_skips_outside() {
        let engine = engine_with(4, 3, &[(0, 0), (3, 2), (9, 9)]);
        assert_eq!((engine.columns(), engine.rows()), (4, 3));
        assert_eq!(
            live_coords(&engine),
            vec![CellCoord::new(0, 0), CellCoord::new(3, 2)]
        );
    }

    #[test]
    fn frozen_rule_keeps_states() {
        assert_eq!(FrozenRule.next_state(CellState::Alive, 0), CellState::Alive);
        assert_eq!(FrozenRule.next_state(CellState::Dead, 3), CellState::Dead);
    }
}
