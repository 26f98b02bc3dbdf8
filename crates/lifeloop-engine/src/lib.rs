//! Real-time simulation loop for Lifeloop.
//!
//! [`SimulationWorld`] is the entry point for hosts: it starts a
//! [`SimulationLoop`] on a dedicated thread, accepts [`InputEvent`]s
//! through a bounded channel and publishes [`GridSnapshot`]s to a
//! [`SnapshotRing`]. The loop runs two independent timers: redraw
//! requests every render interval, and grid steps every update interval
//! while running.
//!
//! [`InputEvent`]: lifeloop_core::InputEvent
//! [`GridSnapshot`]: lifeloop_grid::GridSnapshot

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod ingress;
pub mod metrics;
pub mod ring;
pub mod sim_loop;
pub mod state;
pub mod world;

pub use clock::SimulationClock;
pub use config::{ConfigError, SimulationConfig};
pub use ingress::{InputSender, SubmitError};
pub use metrics::LoopMetrics;
pub use ring::SnapshotRing;
pub use sim_loop::{Iteration, SimulationLoop};
pub use state::RunState;
pub use world::{ShutdownReport, SimulationWorld};
