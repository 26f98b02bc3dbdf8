//! Two-state birth/survival rules.

use std::fmt;
use std::str::FromStr;

use lifeloop_core::{CellState, RuleParseError};

use crate::parse::{parse_counts, split_rulestring};
use crate::rule::Rule;

/// A "Life-like" rule given by birth and survival neighbour counts.
///
/// Bit `n` of `birth` set means a dead cell with `n` live neighbours
/// is born; bit `n` of `survive` set means a live cell with `n` live
/// neighbours stays alive. Every other cell is dead next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeLike {
    birth: u16,
    survive: u16,
    name: String,
}

impl LifeLike {
    /// Build from neighbour-count bitmasks.
    pub fn from_masks(birth: u16, survive: u16) -> Self {
        let mut rule = Self {
            birth: birth & 0x1ff,
            survive: survive & 0x1ff,
            name: String::new(),
        };
        rule.name = rule.to_string();
        rule
    }

    /// Build from neighbour-count lists.
    pub fn from_counts(birth: &[u8], survive: &[u8]) -> Self {
        Self::from_masks(mask_of(birth), mask_of(survive))
    }

    /// Conway's Game of Life, `B3/S23`.
    pub fn conway() -> Self {
        Self::from_counts(&[3], &[2, 3])
    }

    /// HighLife, `B36/S23`.
    pub fn highlife() -> Self {
        Self::from_counts(&[3, 6], &[2, 3])
    }

    /// Seeds, `B2/S`: every live cell dies each step.
    pub fn seeds() -> Self {
        Self::from_counts(&[2], &[])
    }

    /// Day & Night, `B3678/S34678`.
    pub fn day_and_night() -> Self {
        Self::from_counts(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// Whether a dead cell with `live` neighbours is born.
    pub fn births(&self, live: u8) -> bool {
        live <= 8 && self.birth & (1 << live) != 0
    }

    /// Whether a live cell with `live` neighbours survives.
    pub fn survives(&self, live: u8) -> bool {
        live <= 8 && self.survive & (1 << live) != 0
    }

    pub(crate) fn masks(&self) -> (u16, u16) {
        (self.birth, self.survive)
    }
}

fn mask_of(counts: &[u8]) -> u16 {
    counts
        .iter()
        .filter(|&&n| n <= 8)
        .fold(0u16, |mask, &n| mask | (1 << n))
}

pub(crate) fn write_counts(f: &mut fmt::Formatter<'_>, mask: u16) -> fmt::Result {
    for n in 0..=8 {
        if mask & (1 << n) != 0 {
            write!(f, "{n}")?;
        }
    }
    Ok(())
}

impl fmt::Display for LifeLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        write_counts(f, self.birth)?;
        f.write_str("/S")?;
        write_counts(f, self.survive)
    }
}

impl FromStr for LifeLike {
    type Err = RuleParseError;

    /// Parse `B<digits>/S<digits>`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_rulestring(s)?;
        if parts.states.is_some() {
            return Err(RuleParseError::Malformed {
                input: s.to_string(),
            });
        }
        Ok(Self::from_masks(
            parse_counts(parts.birth)?,
            parse_counts(parts.survive)?,
        ))
    }
}

impl Rule for LifeLike {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_state(&self, current: CellState, live: u8) -> CellState {
        let alive = match current {
            CellState::Alive => self.survives(live),
            CellState::Dead | CellState::Dying(_) => self.births(live),
        };
        CellState::from(alive)
    }
}
