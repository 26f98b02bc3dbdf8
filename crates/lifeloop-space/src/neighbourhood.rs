//! Neighbour offsets and lookup over a [`Geometry`].

use lifeloop_core::CellCoord;
use smallvec::SmallVec;

use crate::edge::EdgeBehavior;
use crate::geometry::Geometry;

/// Moore offsets: N, S, W, E, NW, NE, SW, SE as `(d_col, d_row)`.
const MOORE: [(i64, i64); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Von Neumann offsets: N, S, W, E.
const VON_NEUMANN: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Which surrounding cells count as neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Neighbourhood {
    /// The 8 surrounding cells (cardinal and diagonal).
    #[default]
    Moore,
    /// The 4 cardinal cells.
    VonNeumann,
}

impl Neighbourhood {
    /// Offsets as `(d_col, d_row)` pairs.
    pub fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Self::Moore => &MOORE,
            Self::VonNeumann => &VON_NEUMANN,
        }
    }

    /// Neighbour count of an interior cell.
    pub fn degree(self) -> usize {
        self.offsets().len()
    }
}

impl Geometry {
    /// Neighbours of `coord` under the given neighbourhood and edge rule.
    ///
    /// With [`EdgeBehavior::Wrap`] on grids narrower than three cells a
    /// neighbour can appear more than once; rules then count it once per
    /// appearance, as a torus would.
    pub fn neighbours(
        &self,
        coord: CellCoord,
        neighbourhood: Neighbourhood,
        edge: EdgeBehavior,
    ) -> SmallVec<[CellCoord; 8]> {
        let mut out = SmallVec::new();
        for &(dc, dr) in neighbourhood.offsets() {
            let col = edge.resolve_axis(i64::from(coord.col) + dc, self.columns());
            let row = edge.resolve_axis(i64::from(coord.row) + dr, self.rows());
            if let (Some(col), Some(row)) = (col, row) {
                out.push(CellCoord { col, row });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TileSize;

    fn grid(cols: u32, rows: u32) -> Geometry {
        Geometry::new(i64::from(cols), i64::from(rows), TileSize::square(1))
    }

    #[test]
    fn moore_absorb_interior_edge_corner() {
        let g = grid(5, 5);
        let hood = Neighbourhood::Moore;
        assert_eq!(g.neighbours(CellCoord::new(2, 2), hood, EdgeBehavior::Absorb).len(), 8);
        assert_eq!(g.neighbours(CellCoord::new(2, 0), hood, EdgeBehavior::Absorb).len(), 5);
        let corner = g.neighbours(CellCoord::new(0, 0), hood, EdgeBehavior::Absorb);
        assert_eq!(corner.len(), 3);
        assert!(corner.contains(&CellCoord::new(1, 0)));
        assert!(corner.contains(&CellCoord::new(0, 1)));
        assert!(corner.contains(&CellCoord::new(1, 1)));
    }

    #[test]
    fn moore_wrap_corner() {
        let g = grid(5, 5);
        let n = g.neighbours(CellCoord::new(0, 0), Neighbourhood::Moore, EdgeBehavior::Wrap);
        assert_eq!(n.len(), 8);
        assert!(n.contains(&CellCoord::new(4, 4)));
        assert!(n.contains(&CellCoord::new(0, 4)));
        assert!(n.contains(&CellCoord::new(4, 0)));
    }

    #[test]
    fn von_neumann_counts() {
        let g = grid(3, 3);
        let hood = Neighbourhood::VonNeumann;
        assert_eq!(hood.degree(), 4);
        assert_eq!(g.neighbours(CellCoord::new(1, 1), hood, EdgeBehavior::Absorb).len(), 4);
        assert_eq!(g.neighbours(CellCoord::new(0, 0), hood, EdgeBehavior::Absorb).len(), 2);
    }

    #[test]
    fn single_cell_wrap_is_its_own_neighbour() {
        let g = grid(1, 1);
        let n = g.neighbours(CellCoord::new(0, 0), Neighbourhood::Moore, EdgeBehavior::Wrap);
        assert_eq!(n.len(), 8);
        assert!(n.iter().all(|c| *c == CellCoord::new(0, 0)));
    }
}
