//! Core types and traits for the Lifeloop simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the grid engine, the simulation loop and
//! the presentation layer: identifiers, cell states, input events,
//! error types, and the [`Presenter`] / [`GridView`] seams.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod event;
pub mod id;
pub mod traits;

pub use cell::{Cell, CellState};
pub use error::{GeometryError, RenderError, RuleParseError, SelectionError};
pub use event::InputEvent;
pub use id::{CellCoord, GridEpoch, PixelPoint, TickId};
pub use traits::{GridView, Presenter};
