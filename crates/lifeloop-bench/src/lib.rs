//! Benchmark profiles for the Lifeloop simulation.
//!
//! - [`reference_engine`]: 256x256 Conway board (64K cells), seeded soup
//! - [`stress_engine`]: 1024x1024 Conway board (~1M cells)
//! - [`brain_engine`]: 256x256 Brian's Brain board, exercising the
//!   multi-state path
//! - [`reference_config`]: a loop config matching [`reference_engine`]

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use lifeloop_engine::SimulationConfig;
use lifeloop_grid::GridEngine;
use lifeloop_rule::{Generations, LifeLike, Rule};
use lifeloop_space::{EdgeBehavior, TileSize};

/// Soup density for every profile.
pub const DENSITY: f64 = 0.35;

fn soup(side: i64, rule: Box<dyn Rule>, seed: u64) -> GridEngine {
    let mut engine =
        GridEngine::new(side, side, TileSize::square(1), rule).with_edge(EdgeBehavior::Wrap);
    engine.seed_random(seed, DENSITY);
    engine
}

/// 256x256 torus under `B3/S23`, 1 px tiles.
pub fn reference_engine(seed: u64) -> GridEngine {
    soup(256, Box::new(LifeLike::conway()), seed)
}

/// 1024x1024 torus under `B3/S23`.
pub fn stress_engine(seed: u64) -> GridEngine {
    soup(1024, Box::new(LifeLike::conway()), seed)
}

/// 256x256 torus under Brian's Brain (`B2/S/C3`).
pub fn brain_engine(seed: u64) -> GridEngine {
    soup(256, Box::new(Generations::brians_brain()), seed)
}

/// Loop config with the same board as [`reference_engine`] and a 1 ms
/// update interval.
pub fn reference_config() -> SimulationConfig {
    let mut config = SimulationConfig::new(256, 256, "bench", 256, 256, 1);
    config.edge = EdgeBehavior::Wrap;
    config
}
