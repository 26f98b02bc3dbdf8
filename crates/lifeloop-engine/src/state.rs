//! Paused / running state machine.

use std::fmt;

/// Whether the loop is stepping the grid.
///
/// A simulation always starts [`Paused`](RunState::Paused) so the user
/// can place cells before anything moves. There is no terminal state:
/// only shutting down the hosting thread ends the loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Edits are accepted; no steps are taken.
    #[default]
    Paused,
    /// Steps are taken every update interval; edits are ignored.
    Running,
}

impl RunState {
    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Paused => Self::Running,
            Self::Running => Self::Paused,
        }
    }

    /// Whether steps are being taken.
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// Whether edits are accepted.
    pub fn is_paused(self) -> bool {
        self == Self::Paused
    }
}

impl From<bool> for RunState {
    /// `true` is running.
    fn from(running: bool) -> Self {
        if running {
            Self::Running
        } else {
            Self::Paused
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paused => f.write_str("paused"),
            Self::Running => f.write_str("running"),
        }
    }
}
