//! Inbound events from the presentation/input layer.

use crate::id::{CellCoord, PixelPoint};

/// An input delivered to the simulation loop.
///
/// Input callbacks never touch the grid directly: they enqueue one of
/// these and the loop applies it at the start of its next iteration.
///
/// # Examples
///
/// ```
/// use lifeloop_core::{InputEvent, PixelPoint};
///
/// // Escape key.
/// let pause = InputEvent::TogglePause;
/// // Left click at (10, 10); only honoured while paused.
/// let click = InputEvent::Select(PixelPoint::new(10, 10));
/// // Window resized to 640x480.
/// let resize = InputEvent::Resize { width: 640, height: 480 };
///
/// assert!(matches!(click, InputEvent::Select(_)));
/// assert_ne!(pause, resize);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Flip between paused and running.
    TogglePause,
    /// Clear every cell and discard staged edits. Run state is unchanged.
    Reset,
    /// Stage a toggle of the cell under a pointer position.
    ///
    /// Ignored while the simulation is running.
    Select(PixelPoint),
    /// The display area changed size. Rebuilds the grid from scratch.
    Resize {
        /// New display width in pixels.
        width: i64,
        /// New display height in pixels.
        height: i64,
    },
    /// Advance exactly one generation. Only honoured while paused.
    StepOnce,
    /// Change the minimum time between steps, in milliseconds.
    SetUpdateInterval {
        /// New interval. Zero is rejected.
        millis: u64,
    },
    /// Replace the board with a seeded random fill.
    Randomize {
        /// RNG seed; identical seeds give identical boards.
        seed: u64,
        /// Probability in `[0, 1]` that a cell starts alive.
        density: f64,
    },
    /// Replace the board with a named built-in pattern.
    LoadPattern {
        /// Pattern name, matched case-insensitively.
        name: String,
        /// Cell the pattern's top-left corner is placed at.
        origin: CellCoord,
    },
}

impl InputEvent {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TogglePause => "toggle_pause",
            Self::Reset => "reset",
            Self::Select(_) => "select",
            Self::Resize { .. } => "resize",
            Self::StepOnce => "step_once",
            Self::SetUpdateInterval { .. } => "set_update_interval",
            Self::Randomize { .. } => "randomize",
            Self::LoadPattern { .. } => "load_pattern",
        }
    }
}
