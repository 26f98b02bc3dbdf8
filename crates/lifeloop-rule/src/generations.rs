//! Multi-state "Generations" rules.

use std::fmt;
use std::str::FromStr;

use lifeloop_core::{CellState, RuleParseError};

use crate::life_like::{write_counts, LifeLike};
use crate::parse::{parse_counts, split_rulestring};
use crate::rule::Rule;

/// A Generations rule: Life-like birth/survival plus a refractory tail.
///
/// With `states = C`, state 0 is dead, state 1 is alive, and states
/// `2..C` are [`CellState::Dying`] steps. A live cell that does not
/// survive starts dying instead of dying outright; dying cells advance
/// one step per tick until they reach dead. Dying cells are not counted
/// as live neighbours and cannot be born into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generations {
    life: LifeLike,
    states: u8,
    name: String,
}

impl Generations {
    /// Build from a Life-like core and a total state count (`>= 2`).
    pub fn new(life: LifeLike, states: u8) -> Result<Self, RuleParseError> {
        if states < 2 {
            return Err(RuleParseError::StateCountOutOfRange {
                value: u32::from(states),
            });
        }
        let mut rule = Self {
            life,
            states,
            name: String::new(),
        };
        rule.name = rule.to_string();
        Ok(rule)
    }

    /// Brian's Brain, `B2/S/C3`.
    pub fn brians_brain() -> Self {
        Self {
            life: LifeLike::seeds(),
            states: 3,
            name: "B2/S/C3".to_string(),
        }
    }

    /// Star Wars, `B2/S345/C4`.
    pub fn star_wars() -> Self {
        Self {
            life: LifeLike::from_counts(&[2], &[3, 4, 5]),
            states: 4,
            name: "B2/S345/C4".to_string(),
        }
    }

    /// Total number of states, dead and alive included.
    pub fn states(&self) -> u8 {
        self.states
    }
}

impl fmt::Display for Generations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (birth, survive) = self.life.masks();
        f.write_str("B")?;
        write_counts(f, birth)?;
        f.write_str("/S")?;
        write_counts(f, survive)?;
        write!(f, "/C{}", self.states)
    }
}

impl FromStr for Generations {
    type Err = RuleParseError;

    /// Parse `B<digits>/S<digits>/C<states>`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_rulestring(s)?;
        let states = parts.states.ok_or_else(|| RuleParseError::Malformed {
            input: s.to_string(),
        })?;
        let life = LifeLike::from_masks(parse_counts(parts.birth)?, parse_counts(parts.survive)?);
        Self::new(life, states)
    }
}

impl Rule for Generations {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_state(&self, current: CellState, live: u8) -> CellState {
        match current {
            CellState::Dead => CellState::from(self.life.births(live)),
            CellState::Alive if self.life.survives(live) => CellState::Alive,
            CellState::Alive if self.states > 2 => CellState::Dying(1),
            CellState::Alive => CellState::Dead,
            // Dying(k) is state k + 1; the last state is C - 1.
            CellState::Dying(k) if u16::from(k) + 2 >= u16::from(self.states) => CellState::Dead,
            CellState::Dying(k) => CellState::Dying(k + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brians_brain_cycle() {
        let rule = Generations::brians_brain();
        assert_eq!(rule.next_state(CellState::Dead, 2), CellState::Alive);
        assert_eq!(rule.next_state(CellState::Dead, 3), CellState::Dead);
        // Firing cells always start dying, regardless of neighbours.
        assert_eq!(rule.next_state(CellState::Alive, 2), CellState::Dying(1));
        // Refractory cells go dead and cannot be born into.
        assert_eq!(rule.next_state(CellState::Dying(1), 2), CellState::Dead);
    }

    #[test]
    fn star_wars_tail_lasts_two_steps() {
        let rule = Generations::star_wars();
        assert_eq!(rule.next_state(CellState::Alive, 4), CellState::Alive);
        assert_eq!(rule.next_state(CellState::Alive, 1), CellState::Dying(1));
        assert_eq!(rule.next_state(CellState::Dying(1), 0), CellState::Dying(2));
        assert_eq!(rule.next_state(CellState::Dying(2), 0), CellState::Dead);
    }

    #[test]
    fn two_states_behaves_like_life_like() {
        let rule = Generations::new(LifeLike::conway(), 2).unwrap();
        let life = LifeLike::conway();
        for n in 0..=8 {
            assert_eq!(
                rule.next_state(CellState::Alive, n),
                life.next_state(CellState::Alive, n)
            );
            assert_eq!(
                rule.next_state(CellState::Dead, n),
                life.next_state(CellState::Dead, n)
            );
        }
    }

    #[test]
    fn parse_and_name() {
        let rule: Generations = "b2/s/c3".parse().unwrap();
        assert_eq!(rule.name(), "B2/S/C3");
        assert_eq!(rule.states(), 3);
        assert!("B2/S".parse::<Generations>().is_err());
        assert!(matches!(
            "B2/S/C1".parse::<Generations>(),
            Err(RuleParseError::StateCountOutOfRange { value: 1 })
        ));
    }
}
