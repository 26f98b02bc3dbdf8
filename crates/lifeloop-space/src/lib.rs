//! Spatial layer for Lifeloop grids.
//!
//! [`Geometry`] turns a display area and a tile size into a
//! `columns × rows` lattice and resolves pointer positions to cells.
//! [`Neighbourhood`] and [`EdgeBehavior`] decide which cells a rule
//! sees around each cell.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod geometry;
pub mod neighbourhood;

pub use edge::EdgeBehavior;
pub use geometry::{Geometry, TileSize, MAX_CELLS};
pub use neighbourhood::Neighbourhood;
