//! Built-in seed patterns.

use lifeloop_core::CellCoord;

/// A named set of live cells, as `(col, row)` offsets from an origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    name: &'static str,
    cells: &'static [(u32, u32)],
}

impl Pattern {
    /// Glider, travelling down and to the right.
    pub const GLIDER: Pattern = Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    };

    /// Period-2 horizontal blinker.
    pub const BLINKER: Pattern = Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    };

    /// Period-2 toad.
    pub const TOAD: Pattern = Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    };

    /// Period-2 beacon.
    pub const BEACON: Pattern = Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    };

    /// 2×2 still life.
    pub const BLOCK: Pattern = Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    };

    /// R-pentomino, a methuselah that settles after 1103 generations.
    pub const R_PENTOMINO: Pattern = Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    };

    /// Every built-in pattern.
    pub const BUILTIN: &'static [Pattern] = &[
        Self::GLIDER,
        Self::BLINKER,
        Self::TOAD,
        Self::BEACON,
        Self::BLOCK,
        Self::R_PENTOMINO,
    ];

    /// Look up a built-in pattern by name.
    ///
    /// Case-insensitive; `_` and `-` are interchangeable.
    ///
    /// ```
    /// use lifeloop_grid::Pattern;
    ///
    /// assert_eq!(Pattern::find("R_Pentomino"), Some(&Pattern::R_PENTOMINO));
    /// assert_eq!(Pattern::find("gosper"), None);
    /// ```
    pub fn find(name: &str) -> Option<&'static Pattern> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        Self::BUILTIN.iter().find(|p| p.name == wanted)
    }

    /// Lower-case name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the pattern has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box as `(columns, rows)`.
    pub fn extent(&self) -> (u32, u32) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(c, r)| (w.max(c + 1), h.max(r + 1)))
    }

    /// Absolute cell positions with the pattern's top-left at `origin`.
    ///
    /// Positions that would overflow `u32` are dropped.
    pub fn cells_at(&self, origin: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().filter_map(move |&(c, r)| {
            Some(CellCoord {
                col: origin.col.checked_add(c)?,
                row: origin.row.checked_add(r)?,
            })
        })
    }
}
