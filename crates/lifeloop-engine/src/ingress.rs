//! Input submission from the presentation layer to the loop thread.

use std::sync::Arc;
use std::thread::Thread;

use crossbeam_channel::{Sender, TrySendError};
use lifeloop_core::{InputEvent, PixelPoint};
use tracing::warn;

use crate::metrics::LoopCounters;

/// Error submitting an input to the loop thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The loop thread has shut down.
    #[error("simulation loop has shut down")]
    Shutdown,
    /// The input channel is full (back-pressure).
    #[error("input channel full")]
    ChannelFull,
}

/// Cloneable handle for pushing [`InputEvent`]s to the loop.
///
/// Sending never blocks. Each accepted event wakes the loop thread so
/// it is applied without waiting for the next interval boundary.
#[derive(Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
    worker: Thread,
    counters: Arc<LoopCounters>,
}

impl InputSender {
    pub(crate) fn new(tx: Sender<InputEvent>, worker: Thread, counters: Arc<LoopCounters>) -> Self {
        Self {
            tx,
            worker,
            counters,
        }
    }

    /// Queue an event for the next loop iteration.
    pub fn send(&self, event: InputEvent) -> Result<(), SubmitError> {
        let kind = event.kind();
        match self.tx.try_send(event) {
            Ok(()) => {
                self.worker.unpark();
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                LoopCounters::bump(&self.counters.inputs_rejected);
                warn!(kind, "input channel full, event dropped");
                Err(SubmitError::ChannelFull)
            }
            Err(TrySendError::Disconnected(_)) => Err(SubmitError::Shutdown),
        }
    }

    /// Flip between paused and running.
    pub fn toggle_pause(&self) -> Result<(), SubmitError> {
        self.send(InputEvent::TogglePause)
    }

    /// Click at a display position.
    pub fn select(&self, x: i32, y: i32) -> Result<(), SubmitError> {
        self.send(InputEvent::Select(PixelPoint::new(x, y)))
    }

    /// Number of events waiting to be drained.
    pub fn queued(&self) -> usize {
        self.tx.len()
    }
}

impl std::fmt::Debug for InputSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSender")
            .field("queued", &self.tx.len())
            .field("capacity", &self.tx.capacity())
            .finish()
    }
}
