//! Row-major cell storage.

use lifeloop_core::{Cell, CellCoord, CellState};
use lifeloop_space::Geometry;

/// A `columns × rows` block of [`Cell`]s laid out row-major.
///
/// The cell vector always holds exactly `geometry.cell_count()` cells,
/// and the cell at index `i` has coordinate `geometry.coord_of(i)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    geometry: Geometry,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead grid over `geometry`.
    pub fn new(geometry: Geometry) -> Self {
        let cells = geometry.coords().map(Cell::dead).collect();
        Self { geometry, cells }
    }

    /// Dimensions of this grid.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `coord`, if in bounds.
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.geometry.index_of(coord).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `coord`, if in bounds.
    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.geometry.index_of(coord).map(move |i| &mut self.cells[i])
    }

    /// State at `coord`, if in bounds.
    pub fn state(&self, coord: CellCoord) -> Option<CellState> {
        self.cell(coord).map(|c| c.state)
    }

    /// Row-major iterator over cell states.
    pub fn states(&self) -> impl ExactSizeIterator<Item = CellState> + '_ {
        self.cells.iter().map(|c| c.state)
    }

    /// Number of cells in the alive state.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state.is_alive()).count()
    }

    /// Number of cells in any state other than dead.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.state.is_dead()).count()
    }

    /// Kill every cell and drop every mark, keeping the dimensions.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Dead;
            cell.marked = false;
        }
    }

    /// Overwrite every state from a row-major buffer.
    ///
    /// Returns the number of cells whose state changed.
    ///
    /// # Panics
    ///
    /// Panics if `next` is not exactly one state per cell.
    pub(crate) fn commit(&mut self, next: &[CellState]) -> usize {
        assert_eq!(next.len(), self.cells.len(), "commit buffer size mismatch");
        let mut changed = 0;
        for (cell, &state) in self.cells.iter_mut().zip(next) {
            if cell.state != state {
                cell.state = state;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeloop_space::TileSize;

    fn grid(cols: i64, rows: i64) -> Grid {
        Grid::new(Geometry::new(cols * 10, rows * 10, TileSize::square(10)))
    }

    #[test]
    fn new_grid_is_all_dead_with_coords_in_order() {
        let g = grid(4, 3);
        assert_eq!(g.cells().len(), 12);
        assert!(g.cells().iter().all(|c| c.state.is_dead() && !c.marked));
        assert_eq!(g.cells()[5].coord, CellCoord::new(1, 1));
        assert_eq!(g.live_count(), 0);
    }

    #[test]
    fn empty_geometry_gives_no_cells() {
        let g = Grid::new(Geometry::new(5, 5, TileSize::square(10)));
        assert!(g.cells().is_empty());
        assert_eq!(g.cell(CellCoord::new(0, 0)), None);
    }

    #[test]
    fn cell_mut_and_clear() {
        let mut g = grid(3, 3);
        let cell = g.cell_mut(CellCoord::new(2, 1)).unwrap();
        cell.state = CellState::Alive;
        cell.marked = true;
        g.cell_mut(CellCoord::new(0, 0)).unwrap().state = CellState::Dying(1);
        assert_eq!(g.live_count(), 1);
        assert_eq!(g.occupied_count(), 2);

        g.clear();
        assert_eq!(g.occupied_count(), 0);
        assert!(g.cells().iter().all(|c| !c.marked));
        assert!(g.cell_mut(CellCoord::new(3, 0)).is_none());
    }

    #[test]
    fn commit_counts_changes() {
        let mut g = grid(2, 2);
        let next = [CellState::Alive, CellState::Dead, CellState::Dead, CellState::Alive];
        assert_eq!(g.commit(&next), 2);
        assert_eq!(g.commit(&next), 0);
        assert_eq!(g.state(CellCoord::new(1, 1)), Some(CellState::Alive));
    }
}
