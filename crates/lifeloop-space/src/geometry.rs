//! Display area → grid dimensions, and pixel → cell resolution.

use lifeloop_core::{CellCoord, GeometryError, PixelPoint, SelectionError};
use tracing::warn;

/// Largest grid [`Geometry`] will describe, in cells.
pub const MAX_CELLS: u64 = 1 << 24;

/// Size of one cell on screen, in pixels.
///
/// A zero width or height describes an empty grid: nothing fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSize {
    /// Tile width in pixels.
    pub width: u32,
    /// Tile height in pixels.
    pub height: u32,
}

impl TileSize {
    /// A `size × size` tile.
    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Derive the tile from a display area and the number of tiles that
    /// should fit across and down it.
    ///
    /// Each side is `floor(extent / count)`, raised to at least one
    /// pixel so a display smaller than the tile count still resolves
    /// clicks. A count of zero or less yields a zero-sized side, which
    /// produces an empty grid. Negative extents count as zero.
    pub fn from_counts(width: i64, height: i64, tiles_x: i64, tiles_y: i64) -> Self {
        Self {
            width: side_from_count(width, tiles_x),
            height: side_from_count(height, tiles_y),
        }
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn side_from_count(extent: i64, count: i64) -> u32 {
    if count <= 0 {
        return 0;
    }
    let side = extent.max(0) / count;
    u32::try_from(side).unwrap_or(u32::MAX).max(1)
}

/// Grid dimensions derived from a display area and a fixed tile size.
///
/// Invariant: `columns = floor(width / tile.width)` and
/// `rows = floor(height / tile.height)`, both zero when the tile is
/// empty. Cells are indexed row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    width: u32,
    height: u32,
    tile: TileSize,
    columns: u32,
    rows: u32,
}

impl Geometry {
    /// Build a geometry, clamping anomalous dimensions.
    ///
    /// Negative or oversized extents are treated as zero, and so is a
    /// display that would need more than [`MAX_CELLS`] cells. Each case
    /// yields an empty grid. The clamp is logged, never reported as an
    /// error.
    pub fn new(width: i64, height: i64, tile: TileSize) -> Self {
        match Self::try_new(width, height, tile) {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!(%err, "clamping display to an empty grid");
                let width = check_dimension("width", width).unwrap_or(0);
                let height = check_dimension("height", height).unwrap_or(0);
                let geometry = Self::from_pixels(width, height, tile);
                if geometry.cells_u64() > MAX_CELLS {
                    Self::from_pixels(0, 0, tile)
                } else {
                    geometry
                }
            }
        }
    }

    /// Build a geometry, rejecting negative or oversized dimensions and
    /// grids of more than [`MAX_CELLS`] cells.
    pub fn try_new(width: i64, height: i64, tile: TileSize) -> Result<Self, GeometryError> {
        let width = check_dimension("width", width)?;
        let height = check_dimension("height", height)?;
        let geometry = Self::from_pixels(width, height, tile);
        if geometry.cells_u64() > MAX_CELLS {
            return Err(GeometryError::TooManyCells {
                columns: geometry.columns,
                rows: geometry.rows,
                max: MAX_CELLS,
            });
        }
        Ok(geometry)
    }

    fn cells_u64(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    fn from_pixels(width: u32, height: u32, tile: TileSize) -> Self {
        let columns = width.checked_div(tile.width).unwrap_or(0);
        let rows = height.checked_div(tile.height).unwrap_or(0);
        Self {
            width,
            height,
            tile,
            columns,
            rows,
        }
    }

    /// The same tile size over a new display area.
    pub fn resized(&self, width: i64, height: i64) -> Self {
        Self::new(width, height, self.tile)
    }

    /// Display width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Display height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile size in pixels.
    pub fn tile(&self) -> TileSize {
        self.tile
    }

    /// Grid width in cells.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Grid height in cells.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// `columns × rows`.
    pub fn cell_count(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Whether `coord` lies inside the grid.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.col < self.columns && coord.row < self.rows
    }

    /// Row-major index of `coord`, or `None` if out of bounds.
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| (coord.row as usize) * (self.columns as usize) + coord.col as usize)
    }

    /// Coordinate of a row-major index.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty.
    pub fn coord_of(&self, index: usize) -> CellCoord {
        let columns = self.columns as usize;
        CellCoord {
            col: (index % columns) as u32,
            row: (index / columns) as u32,
        }
    }

    /// Row-major iterator over every coordinate.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| CellCoord { col, row }))
    }

    /// Resolve a pointer position to the cell under it.
    ///
    /// `(col, row) = (floor(x / tile.width), floor(y / tile.height))`.
    /// Negative positions and positions past the last column or row are
    /// [`SelectionError::OutOfBounds`].
    pub fn cell_at(&self, point: PixelPoint) -> Result<CellCoord, SelectionError> {
        let out_of_bounds = || SelectionError::OutOfBounds {
            point,
            columns: self.columns,
            rows: self.rows,
        };
        if point.x < 0 || point.y < 0 || self.tile.is_empty() {
            return Err(out_of_bounds());
        }
        let coord = CellCoord {
            col: point.x as u32 / self.tile.width,
            row: point.y as u32 / self.tile.height,
        };
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(out_of_bounds())
        }
    }

    /// Top-left pixel of the tile drawn for `coord`.
    pub fn tile_origin(&self, coord: CellCoord) -> PixelPoint {
        let x = i64::from(coord.col) * i64::from(self.tile.width);
        let y = i64::from(coord.row) * i64::from(self.tile.height);
        PixelPoint {
            x: i32::try_from(x).unwrap_or(i32::MAX),
            y: i32::try_from(y).unwrap_or(i32::MAX),
        }
    }
}

fn check_dimension(name: &'static str, value: i64) -> Result<u32, GeometryError> {
    if value < 0 {
        return Err(GeometryError::Negative { name, value });
    }
    u32::try_from(value).map_err(|_| GeometryError::TooLarge {
        name,
        value,
        max: u32::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dimensions_floor_divide() {
        let g = Geometry::new(325, 249, TileSize::square(20));
        assert_eq!(g.columns(), 16);
        assert_eq!(g.rows(), 12);
        assert_eq!(g.cell_count(), 192);
    }

    #[test]
    fn tile_from_counts_matches_viewport_ratio() {
        let tile = TileSize::from_counts(320, 240, 16, 12);
        assert_eq!(tile, TileSize::square(20));
        let g = Geometry::new(320, 240, tile);
        assert_eq!((g.columns(), g.rows()), (16, 12));
    }

    #[test]
    fn non_positive_tile_count_gives_empty_grid() {
        let tile = TileSize::from_counts(320, 240, 0, 12);
        assert!(tile.is_empty());
        let g = Geometry::new(320, 240, tile);
        assert!(g.is_empty());
        assert_eq!(g.columns(), 0);

        let tile = TileSize::from_counts(320, 240, 16, -3);
        assert!(Geometry::new(320, 240, tile).is_empty());
    }

    #[test]
    fn tiny_display_keeps_one_pixel_tiles() {
        let tile = TileSize::from_counts(10, 10, 40, 40);
        assert_eq!(tile, TileSize::square(1));
        assert_eq!(Geometry::new(10, 10, tile).columns(), 10);
    }

    #[test]
    fn negative_dimensions_clamp_to_empty() {
        let g = Geometry::new(-100, 240, TileSize::square(20));
        assert_eq!(g.width(), 0);
        assert_eq!(g.columns(), 0);
        assert_eq!(g.rows(), 12);
        assert!(g.is_empty());
    }

    #[test]
    fn oversized_dimensions_clamp_to_empty() {
        let g = Geometry::new(i64::MAX, i64::MAX, TileSize::square(20));
        assert_eq!((g.columns(), g.rows()), (0, 0));
        assert_eq!(g.cell_count(), 0);

        let g = Geometry::new(i64::MAX, 240, TileSize::square(20));
        assert_eq!(g.width(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn too_many_cells_clamp_to_empty() {
        // Fits in u32 per axis, but 65536 x 65536 one-pixel cells is 2^32.
        let g = Geometry::new(65_536, 65_536, TileSize::square(1));
        assert!(g.is_empty());
        assert_eq!(
            Geometry::try_new(65_536, 65_536, TileSize::square(1)),
            Err(GeometryError::TooManyCells {
                columns: 65_536,
                rows: 65_536,
                max: MAX_CELLS
            })
        );
        // The cap itself is accepted.
        let g = Geometry::new(4096, 4096, TileSize::square(1));
        assert_eq!(g.cell_count() as u64, MAX_CELLS);
    }

    #[test]
    fn try_new_rejects_negative() {
        let err = Geometry::try_new(10, -1, TileSize::square(2)).unwrap_err();
        assert_eq!(
            err,
            GeometryError::Negative {
                name: "height",
                value: -1
            }
        );
    }

    #[test]
    fn resized_keeps_tile() {
        let g = Geometry::new(320, 240, TileSize::square(20)).resized(100, 60);
        assert_eq!(g.tile(), TileSize::square(20));
        assert_eq!((g.columns(), g.rows()), (5, 3));
    }

    #[test]
    fn cell_at_resolves_and_rejects() {
        let g = Geometry::new(320, 240, TileSize::square(20));
        assert_eq!(g.cell_at(PixelPoint::new(10, 10)), Ok(CellCoord::new(0, 0)));
        assert_eq!(g.cell_at(PixelPoint::new(319, 239)), Ok(CellCoord::new(15, 11)));
        assert!(g.cell_at(PixelPoint::new(320, 0)).is_err());
        assert!(g.cell_at(PixelPoint::new(0, 240)).is_err());
        assert!(g.cell_at(PixelPoint::new(-1, 5)).is_err());
    }

    #[test]
    fn cell_at_rejects_partial_trailing_tile() {
        // 330 px wide / 20 px tiles = 16 columns; pixels 320..330 are a
        // sliver that belongs to no column.
        let g = Geometry::new(330, 240, TileSize::square(20));
        assert!(g.cell_at(PixelPoint::new(325, 0)).is_err());
    }

    #[test]
    fn index_round_trip_and_order() {
        let g = Geometry::new(60, 40, TileSize::square(10));
        let coords: Vec<_> = g.coords().collect();
        assert_eq!(coords.len(), 24);
        assert_eq!(coords[0], CellCoord::new(0, 0));
        assert_eq!(coords[6], CellCoord::new(0, 1));
        for (i, c) in coords.iter().enumerate() {
            assert_eq!(g.index_of(*c), Some(i));
            assert_eq!(g.coord_of(i), *c);
        }
        assert_eq!(g.index_of(CellCoord::new(6, 0)), None);
    }

    #[test]
    fn tile_origin_scales() {
        let g = Geometry::new(320, 240, TileSize { width: 20, height: 10 });
        assert_eq!(g.tile_origin(CellCoord::new(3, 2)), PixelPoint::new(60, 20));
    }

    proptest! {
        #[test]
        fn dimensions_follow_invariant(w in 0i64..4000, h in 0i64..4000, t in 1u32..64) {
            let g = Geometry::new(w, h, TileSize::square(t));
            prop_assert_eq!(i64::from(g.columns()), w / i64::from(t));
            prop_assert_eq!(i64::from(g.rows()), h / i64::from(t));
            prop_assert_eq!(g.cell_count(), g.coords().count());
        }

        #[test]
        fn cell_at_is_floor_division(
            w in 1i64..2000, h in 1i64..2000, t in 1u32..50,
            x in -100i32..2100, y in -100i32..2100,
        ) {
            let g = Geometry::new(w, h, TileSize::square(t));
            let expected = (x >= 0 && y >= 0)
                .then(|| CellCoord::new(x as u32 / t, y as u32 / t))
                .filter(|c| g.contains(*c));
            prop_assert_eq!(g.cell_at(PixelPoint::new(x, y)).ok(), expected);
        }
    }
}
