//! Lifeloop: a real-time cellular-automaton simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Lifeloop sub-crates. Hosts usually need only this one dependency.
//!
//! # Quick start
//!
//! Drive the grid directly, with no loop thread:
//!
//! ```rust
//! use lifeloop::prelude::*;
//!
//! // 320×240 pixels in 16×12 tiles of 20 px.
//! let mut engine = GridEngine::new(320, 240, TileSize::square(20), parse_rule("conway").unwrap());
//! engine.apply_pattern(&Pattern::BLINKER, CellCoord::new(4, 4));
//! assert_eq!(engine.live_count(), 3);
//!
//! let outcome = engine.step();
//! assert_eq!(outcome.changed, 4);
//! assert_eq!(engine.draw_snapshot().tick_id(), TickId(1));
//! ```
//!
//! Or hand the grid to a [`engine::SimulationWorld`], which steps it on a
//! background thread and asks a [`prelude::Presenter`] to redraw:
//!
//! ```rust
//! use lifeloop::prelude::*;
//!
//! struct NoopPresenter;
//! impl Presenter for NoopPresenter {
//!     fn request_redraw(&self) -> Result<(), RenderError> {
//!         Ok(())
//!     }
//! }
//!
//! let config = SimulationConfig::new(320, 240, "Game of Life", 16, 12, 100);
//! let mut world = SimulationWorld::new(config, NoopPresenter).unwrap();
//! assert_eq!(world.run_state(), RunState::Paused);
//! world.toggle_pause().unwrap();
//! let report = world.shutdown();
//! assert!(report.loop_joined);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lifeloop-core` | IDs, cell states, input events, errors, core traits |
//! | [`space`] | `lifeloop-space` | Display geometry, tiles, neighbourhoods, edges |
//! | [`rule`] | `lifeloop-rule` | Rule trait, life-like and Generations rules, parsing |
//! | [`grid`] | `lifeloop-grid` | Grid engine, snapshots, patterns |
//! | [`engine`] | `lifeloop-engine` | Simulation loop, config, world handle |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`lifeloop-core`).
pub use lifeloop_core as types;

/// Display geometry and neighbourhoods (`lifeloop-space`).
///
/// [`space::Geometry`] maps a pixel area and a [`space::TileSize`] to
/// columns and rows, and resolves pixel points to cells.
pub use lifeloop_space as space;

/// Automaton rules (`lifeloop-rule`).
///
/// The [`rule::Rule`] trait is the extension point for custom automata.
pub use lifeloop_rule as rule;

/// Grid engine (`lifeloop-grid`).
pub use lifeloop_grid as grid;

/// Simulation loop (`lifeloop-engine`).
///
/// [`engine::SimulationWorld`] runs the loop on its own thread;
/// [`engine::SimulationLoop`] can be driven by hand with explicit instants.
pub use lifeloop_engine as engine;

/// Common imports for typical Lifeloop usage.
///
/// ```rust
/// use lifeloop::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use lifeloop_core::{
        CellCoord, CellState, GridEpoch, GridView, InputEvent, PixelPoint, Presenter, TickId,
    };

    // Errors
    pub use lifeloop_core::{RenderError, RuleParseError, SelectionError};

    // Space
    pub use lifeloop_space::{EdgeBehavior, Geometry, TileSize};

    // Rules
    pub use lifeloop_rule::{parse_rule, Rule};

    // Grid
    pub use lifeloop_grid::{GridEngine, GridSnapshot, Pattern, StepOutcome};

    // Engine
    pub use lifeloop_engine::{
        ConfigError, LoopMetrics, RunState, SimulationConfig, SimulationWorld, SubmitError,
    };
}
