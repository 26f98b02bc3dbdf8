//! Grid engine for Lifeloop.
//!
//! [`GridEngine`] owns the cell grid and everything that mutates it:
//! synchronous rule steps, staged edits while paused, reset, resize and
//! seeding. It knows nothing about time or input; the simulation loop
//! decides when each operation runs.
//!
//! Readers never borrow the live grid. [`GridEngine::draw_snapshot`]
//! produces an owned [`GridSnapshot`] that can be shared across threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod grid;
pub mod pattern;
pub mod snapshot;

pub use engine::{GridEngine, StepOutcome};
pub use grid::Grid;
pub use pattern::Pattern;
pub use snapshot::GridSnapshot;
