//! Rulestring parsing.

use lifeloop_core::RuleParseError;

use crate::generations::Generations;
use crate::life_like::LifeLike;
use crate::rule::Rule;

/// The pieces of a `B.../S...[/C...]` rulestring.
pub(crate) struct RuleParts<'a> {
    pub birth: &'a str,
    pub survive: &'a str,
    pub states: Option<u8>,
}

/// Build a rule from a rulestring or a preset name.
///
/// Presets (case-insensitive): `conway` / `life`, `highlife`, `seeds`,
/// `day_and_night`, `brians_brain`, `star_wars`. Anything else is
/// parsed as `B<digits>/S<digits>` (Life-like) or
/// `B<digits>/S<digits>/C<states>` (Generations).
///
/// # Examples
///
/// ```
/// use lifeloop_core::CellState;
/// use lifeloop_rule::parse_rule;
///
/// let rule = parse_rule("B3/S23").unwrap();
/// assert_eq!(rule.name(), "B3/S23");
/// assert_eq!(rule.next_state(CellState::Dead, 3), CellState::Alive);
///
/// let brain = parse_rule("brians_brain").unwrap();
/// assert_eq!(brain.name(), "B2/S/C3");
/// ```
pub fn parse_rule(input: &str) -> Result<Box<dyn Rule>, RuleParseError> {
    let trimmed = input.trim();
    let preset: Option<Box<dyn Rule>> = match trimmed.to_ascii_lowercase().as_str() {
        "conway" | "life" => Some(Box::new(LifeLike::conway())),
        "highlife" => Some(Box::new(LifeLike::highlife())),
        "seeds" => Some(Box::new(LifeLike::seeds())),
        "day_and_night" => Some(Box::new(LifeLike::day_and_night())),
        "brians_brain" => Some(Box::new(Generations::brians_brain())),
        "star_wars" => Some(Box::new(Generations::star_wars())),
        _ => None,
    };
    if let Some(rule) = preset {
        return Ok(rule);
    }
    if split_rulestring(trimmed)?.states.is_some() {
        Ok(Box::new(trimmed.parse::<Generations>()?))
    } else {
        Ok(Box::new(trimmed.parse::<LifeLike>()?))
    }
}

pub(crate) fn split_rulestring(input: &str) -> Result<RuleParts<'_>, RuleParseError> {
    let malformed = || RuleParseError::Malformed {
        input: input.to_string(),
    };
    let mut parts = input.trim().split('/');
    let birth = parts
        .next()
        .and_then(|p| strip_tag(p, 'b'))
        .ok_or_else(malformed)?;
    let survive = parts
        .next()
        .and_then(|p| strip_tag(p, 's'))
        .ok_or_else(malformed)?;
    let states = match parts.next() {
        None => None,
        Some(p) => {
            let digits = strip_tag(p, 'c').ok_or_else(malformed)?;
            let value: u32 = digits.parse().map_err(|_| malformed())?;
            if !(2..=255).contains(&value) {
                return Err(RuleParseError::StateCountOutOfRange { value });
            }
            Some(value as u8)
        }
    };
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(RuleParts {
        birth,
        survive,
        states,
    })
}

fn strip_tag(part: &str, tag: char) -> Option<&str> {
    let mut chars = part.chars();
    let first = chars.next()?;
    first
        .eq_ignore_ascii_case(&tag)
        .then(|| chars.as_str())
}

/// Neighbour-count digits to a bitmask.
pub(crate) fn parse_counts(digits: &str) -> Result<u16, RuleParseError> {
    let mut mask = 0u16;
    for c in digits.chars() {
        match c.to_digit(10) {
            Some(n) if n <= 8 => mask |= 1 << n,
            Some(_) => return Err(RuleParseError::CountOutOfRange { digit: c }),
            None => {
                return Err(RuleParseError::Malformed {
                    input: digits.to_string(),
                })
            }
        }
    }
    Ok(mask)
}
