//! Test utilities and mock types for Lifeloop development.
//!
//! Provides mock [`Presenter`]s that record or fail redraw requests,
//! and grid [`fixtures`] for building boards in a line.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{engine_with, live_coords, FrozenRule};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lifeloop_core::{Presenter, RenderError};

/// Counts redraw requests. Clones share the count.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    redraws: Arc<AtomicU64>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redraw requests received so far.
    pub fn redraws(&self) -> u64 {
        self.redraws.load(Ordering::Acquire)
    }
}

impl Presenter for RecordingPresenter {
    fn request_redraw(&self) -> Result<(), RenderError> {
        self.redraws.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Failure {
    Error,
    Panic,
}

/// Fails every redraw request, by error or by panic.
#[derive(Clone, Debug)]
pub struct FailingPresenter {
    failure: Failure,
    attempts: Arc<AtomicU64>,
}

impl FailingPresenter {
    /// Returns [`RenderError::SurfaceLost`] on every call.
    pub fn erroring() -> Self {
        Self {
            failure: Failure::Error,
            attempts: Arc::default(),
        }
    }

    /// Panics on every call.
    pub fn panicking() -> Self {
        Self {
            failure: Failure::Panic,
            attempts: Arc::default(),
        }
    }

    /// Redraw requests received so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Acquire)
    }
}

impl Presenter for FailingPresenter {
    fn request_redraw(&self) -> Result<(), RenderError> {
        let n = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        match self.failure {
            Failure::Error => Err(RenderError::SurfaceLost),
            Failure::Panic => panic!("presenter failure #{n}"),
        }
    }
}
