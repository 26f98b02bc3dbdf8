//! Cellular-automaton rules for Lifeloop.
//!
//! A [`Rule`] maps a cell's current state and its live-neighbour count
//! to the next state. The grid engine calls it once per cell per step,
//! always against the pre-step generation.
//!
//! Two families ship with the crate:
//! - [`LifeLike`]: two-state birth/survival rules (`B3/S23` is Conway's Life)
//! - [`Generations`]: multi-state rules with a refractory countdown
//!   (`B2/S/C3` is Brian's Brain)
//!
//! [`parse_rule`] builds either family from a rulestring or a preset name.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod generations;
pub mod life_like;
pub mod parse;
pub mod rule;

pub use generations::Generations;
pub use life_like::LifeLike;
pub use parse::parse_rule;
pub use rule::Rule;
