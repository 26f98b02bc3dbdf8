//! The [`Rule`] trait.

use lifeloop_core::CellState;
use lifeloop_space::Neighbourhood;

/// A deterministic cell transition function.
///
/// # Contract
///
/// - `next_state()` MUST be deterministic: the same `(current, live)`
///   pair always produces the same result.
/// - `&self`: rules are stateless; all state lives in the grid.
/// - Only neighbours in the [`CellState::Alive`] state are counted.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores its rule as
/// `Box<dyn Rule>`.
///
/// # Examples
///
/// A rule where every cell copies the majority of its neighbourhood:
///
/// ```
/// use lifeloop_core::CellState;
/// use lifeloop_rule::Rule;
///
/// struct Majority;
///
/// impl Rule for Majority {
///     fn name(&self) -> &str { "majority" }
///
///     fn next_state(&self, current: CellState, live: u8) -> CellState {
///         match live {
///             0..=3 => CellState::Dead,
///             4 => current,
///             _ => CellState::Alive,
///         }
///     }
/// }
///
/// assert_eq!(Majority.next_state(CellState::Dead, 6), CellState::Alive);
/// ```
pub trait Rule: Send + Sync + 'static {
    /// Human-readable name for logging and snapshots.
    fn name(&self) -> &str;

    /// Which surrounding cells count as neighbours. Default: Moore.
    fn neighbourhood(&self) -> Neighbourhood {
        Neighbourhood::Moore
    }

    /// The state `current` moves to given `live` alive neighbours.
    fn next_state(&self, current: CellState, live: u8) -> CellState;
}

