//! Boundary behavior for neighbour lookups.

use serde::Deserialize;

/// How the grid treats neighbours past its edges.
///
/// # Examples
///
/// ```
/// use lifeloop_core::CellCoord;
/// use lifeloop_space::{EdgeBehavior, Geometry, Neighbourhood, TileSize};
///
/// let geometry = Geometry::new(40, 40, TileSize::square(10));
/// let corner = CellCoord::new(0, 0);
///
/// // Absorb: a corner has 3 Moore neighbours.
/// let n = geometry.neighbours(corner, Neighbourhood::Moore, EdgeBehavior::Absorb);
/// assert_eq!(n.len(), 3);
///
/// // Wrap: every cell has 8 (torus).
/// let n = geometry.neighbours(corner, Neighbourhood::Moore, EdgeBehavior::Wrap);
/// assert_eq!(n.len(), 8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeBehavior {
    /// Out-of-bounds neighbours are omitted; the outside counts as dead.
    #[default]
    Absorb,
    /// Out-of-bounds neighbours wrap to the opposite side (periodic).
    Wrap,
}

impl EdgeBehavior {
    /// Resolve one axis value, or `None` if it falls off an absorbing edge.
    pub(crate) fn resolve_axis(self, val: i64, len: u32) -> Option<u32> {
        let n = i64::from(len);
        if n == 0 {
            return None;
        }
        if (0..n).contains(&val) {
            return u32::try_from(val).ok();
        }
        match self {
            Self::Absorb => None,
            Self::Wrap => u32::try_from(val.rem_euclid(n)).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_drops_out_of_range() {
        assert_eq!(EdgeBehavior::Absorb.resolve_axis(-1, 5), None);
        assert_eq!(EdgeBehavior::Absorb.resolve_axis(5, 5), None);
        assert_eq!(EdgeBehavior::Absorb.resolve_axis(4, 5), Some(4));
    }

    #[test]
    fn wrap_is_periodic() {
        assert_eq!(EdgeBehavior::Wrap.resolve_axis(-1, 5), Some(4));
        assert_eq!(EdgeBehavior::Wrap.resolve_axis(5, 5), Some(0));
        assert_eq!(EdgeBehavior::Wrap.resolve_axis(-6, 5), Some(4));
    }

    #[test]
    fn empty_axis_resolves_nothing() {
        assert_eq!(EdgeBehavior::Wrap.resolve_axis(0, 0), None);
    }
}
