//! The grid engine: stepping, staged edits, reset and resize.

use indexmap::IndexSet;
use lifeloop_core::{
    CellCoord, CellState, GridEpoch, GridView, PixelPoint, SelectionError, TickId,
};
use lifeloop_rule::Rule;
use lifeloop_space::{EdgeBehavior, Geometry, TileSize};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::grid::Grid;
use crate::pattern::Pattern;
use crate::snapshot::GridSnapshot;

/// Result of one [`GridEngine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Cells whose state differs from the previous generation.
    pub changed: usize,
    /// Alive cells after the step.
    pub live: usize,
    /// Tick reached by the step.
    pub tick: TickId,
}

/// Owns the grid and every operation that mutates it.
///
/// # Edit mode
///
/// The engine starts in edit mode, mirroring a simulation that starts
/// paused. In edit mode [`select_entity`](Self::select_entity) stages
/// toggles and [`update_marked_entities`](Self::update_marked_entities)
/// applies them. Outside edit mode both are no-ops. Staged edits survive
/// leaving edit mode; the caller is expected to flush them first.
///
/// # Stepping
///
/// [`step`](Self::step) is synchronous: every next state is computed
/// from the current generation into a scratch buffer before any cell is
/// written.
pub struct GridEngine {
    grid: Grid,
    rule: Box<dyn Rule>,
    edge: EdgeBehavior,
    scratch: Vec<CellState>,
    pending: IndexSet<CellCoord>,
    tick: TickId,
    epoch: GridEpoch,
    edit_mode: bool,
}

impl GridEngine {
    /// Build an all-dead grid over a `width × height` pixel area.
    ///
    /// Negative dimensions are clamped to zero and logged.
    pub fn new(width: i64, height: i64, tile: TileSize, rule: Box<dyn Rule>) -> Self {
        let geometry = Geometry::new(width, height, tile);
        info!(
            columns = geometry.columns(),
            rows = geometry.rows(),
            rule = rule.name(),
            "grid initialised"
        );
        Self {
            grid: Grid::new(geometry),
            rule,
            edge: EdgeBehavior::default(),
            scratch: Vec::with_capacity(geometry.cell_count()),
            pending: IndexSet::new(),
            tick: TickId::default(),
            epoch: GridEpoch::default(),
            edit_mode: true,
        }
    }

    /// Set how neighbour lookups treat the grid border.
    pub fn with_edge(mut self, edge: EdgeBehavior) -> Self {
        self.edge = edge;
        self
    }

    /// Advance every cell by one generation.
    pub fn step(&mut self) -> StepOutcome {
        let geometry = *self.grid.geometry();
        let neighbourhood = self.rule.neighbourhood();
        let cells = self.grid.cells();

        self.scratch.clear();
        self.scratch.extend(cells.iter().map(|cell| {
            let live = geometry
                .neighbours(cell.coord, neighbourhood, self.edge)
                .into_iter()
                .filter_map(|n| geometry.index_of(n))
                .filter(|&i| cells[i].state.is_alive())
                .count();
            // At most 8 neighbours.
            self.rule.next_state(cell.state, live as u8)
        }));

        let changed = self.grid.commit(&self.scratch);
        self.tick = self.tick.next();
        let outcome = StepOutcome {
            changed,
            live: self.grid.live_count(),
            tick: self.tick,
        };
        trace!(tick = %outcome.tick, changed, live = outcome.live, "step");
        outcome
    }

    /// Owned copy of the current generation.
    pub fn draw_snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(
            *self.grid.geometry(),
            self.grid.states().collect(),
            self.pending.iter().copied().collect(),
            self.tick,
            self.epoch,
            self.rule.name().to_string(),
        )
    }

    /// Kill every cell and discard staged edits. Dimensions are kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.start_epoch();
        info!(epoch = %self.epoch, "grid reset");
    }

    /// Recompute dimensions for a new display area.
    ///
    /// The tile size is unchanged. Prior contents are discarded: the
    /// new grid is all dead.
    pub fn resize(&mut self, width: i64, height: i64) {
        let geometry = self.grid.geometry().resized(width, height);
        self.grid = Grid::new(geometry);
        self.scratch = Vec::with_capacity(geometry.cell_count());
        self.start_epoch();
        info!(
            width = geometry.width(),
            height = geometry.height(),
            columns = geometry.columns(),
            rows = geometry.rows(),
            epoch = %self.epoch,
            "grid resized"
        );
    }

    fn start_epoch(&mut self) {
        self.pending.clear();
        self.tick = TickId::default();
        self.epoch = self.epoch.next();
    }

    /// Stage a toggle of the cell under a pointer position.
    ///
    /// Only in edit mode. Selecting a staged cell again un-stages it.
    /// Out-of-bounds points are ignored. Returns the affected cell.
    pub fn select_entity(&mut self, point: PixelPoint) -> Option<CellCoord> {
        if !self.edit_mode {
            debug!(%point, "selection outside edit mode ignored");
            return None;
        }
        let coord = match self.grid.geometry().cell_at(point) {
            Ok(coord) => coord,
            Err(err) => {
                debug!(%err, "selection ignored");
                return None;
            }
        };
        let cell = self.grid.cell_mut(coord)?;
        cell.marked = !cell.marked;
        if cell.marked {
            self.pending.insert(coord);
        } else {
            self.pending.shift_remove(&coord);
        }
        debug!(%coord, staged = cell.marked, "cell selected");
        Some(coord)
    }

    /// Apply every staged toggle and clear the marks.
    ///
    /// Only in edit mode. Returns the number of cells changed; a second
    /// call with no new selections returns zero.
    pub fn update_marked_entities(&mut self) -> usize {
        if !self.edit_mode || self.pending.is_empty() {
            return 0;
        }
        let mut applied = 0;
        for coord in self.pending.drain(..) {
            if let Some(cell) = self.grid.cell_mut(coord) {
                if cell.apply_mark() {
                    applied += 1;
                }
            }
        }
        debug!(applied, "staged edits applied");
        applied
    }

    /// Enter or leave edit mode.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        if self.edit_mode != enabled {
            debug!(enabled, pending = self.pending.len(), "edit mode changed");
        }
        self.edit_mode = enabled;
    }

    /// Whether edits are currently accepted.
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Number of staged toggles.
    pub fn pending_edits(&self) -> usize {
        self.pending.len()
    }

    /// Whether a toggle is staged at `coord`.
    pub fn is_marked(&self, coord: CellCoord) -> bool {
        self.grid.cell(coord).is_some_and(|c| c.marked)
    }

    /// Write a state directly, bypassing edit mode.
    pub fn set_cell(&mut self, coord: CellCoord, state: CellState) -> Result<(), SelectionError> {
        let geometry = *self.grid.geometry();
        let cell = self
            .grid
            .cell_mut(coord)
            .ok_or(SelectionError::CellOutOfBounds {
                coord,
                columns: geometry.columns(),
                rows: geometry.rows(),
            })?;
        cell.state = state;
        Ok(())
    }

    /// Clear the board and place `pattern` with its top-left at `origin`.
    ///
    /// Cells falling outside the grid are skipped. Returns the number of
    /// cells placed.
    pub fn apply_pattern(&mut self, pattern: &Pattern, origin: CellCoord) -> usize {
        self.grid.clear();
        self.start_epoch();
        let mut placed = 0;
        for coord in pattern.cells_at(origin) {
            if let Some(cell) = self.grid.cell_mut(coord) {
                cell.state = CellState::Alive;
                placed += 1;
            }
        }
        info!(
            pattern = pattern.name(),
            %origin,
            placed,
            skipped = pattern.len() - placed,
            "pattern loaded"
        );
        placed
    }

    /// Clear the board and make each cell alive with probability
    /// `density`, reproducibly for a given `seed`.
    ///
    /// `density` is clamped to `0.0..=1.0`; NaN counts as zero.
    /// Returns the number of live cells.
    pub fn seed_random(&mut self, seed: u64, density: f64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        self.grid.clear();
        self.start_epoch();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let geometry = *self.grid.geometry();
        let mut live = 0;
        for coord in geometry.coords() {
            if rng.random::<f64>() < density {
                if let Some(cell) = self.grid.cell_mut(coord) {
                    cell.state = CellState::Alive;
                    live += 1;
                }
            }
        }
        info!(seed, density, live, "grid randomised");
        live
    }

    /// Number of alive cells.
    pub fn live_count(&self) -> usize {
        self.grid.live_count()
    }

    /// Current dimensions.
    pub fn geometry(&self) -> &Geometry {
        self.grid.geometry()
    }

    /// The live grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Steps since the last reset or resize.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Current board lifetime.
    pub fn epoch(&self) -> GridEpoch {
        self.epoch
    }

    /// Name of the active rule.
    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }

    /// Neighbour handling at the border.
    pub fn edge(&self) -> EdgeBehavior {
        self.edge
    }
}

impl GridView for GridEngine {
    fn columns(&self) -> u32 {
        self.grid.geometry().columns()
    }

    fn rows(&self) -> u32 {
        self.grid.geometry().rows()
    }

    fn state_at(&self, coord: CellCoord) -> Option<CellState> {
        self.grid.state(coord)
    }

    fn tick_id(&self) -> TickId {
        self.tick
    }

    fn epoch(&self) -> GridEpoch {
        self.epoch
    }
}

impl std::fmt::Debug for GridEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridEngine")
            .field("geometry", self.grid.geometry())
            .field("rule", &self.rule.name())
            .field("edge", &self.edge)
            .field("tick", &self.tick)
            .field("epoch", &self.epoch)
            .field("edit_mode", &self.edit_mode)
            .field("pending", &self.pending.len())
            .finish()
    }
}
