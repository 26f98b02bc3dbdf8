//! Fixed-capacity ring of published grid snapshots.
//!
//! [`SnapshotRing`] stores `Arc<GridSnapshot>` slots with single-producer
//! push and multi-consumer read. The loop thread pushes after every grid
//! mutation; presenters and the host read the latest entry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lifeloop_grid::GridSnapshot;

/// A slot tagged with the write position it was filled at. Readers
/// compare tags to notice that the producer has lapped them.
type Slot = Option<(u64, Arc<GridSnapshot>)>;

/// A fixed-capacity ring buffer of `Arc<GridSnapshot>`.
///
/// Single-producer: only the loop thread calls [`push`](Self::push).
/// Multi-consumer: any thread can call [`latest`](Self::latest).
///
/// The ring is seeded with one snapshot at construction, so there is
/// always a latest entry. The write position is monotonically
/// increasing; slot index is `pos % capacity`.
pub struct SnapshotRing {
    slots: Vec<Mutex<Slot>>,
    write_pos: AtomicU64,
    capacity: usize,
}

const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SnapshotRing>();
};

impl SnapshotRing {
    /// Create a ring holding `first` at position 0.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`.
    pub fn new(capacity: usize, first: GridSnapshot) -> Self {
        assert!(capacity >= 2, "SnapshotRing capacity must be >= 2, got {capacity}");
        let slots = (0..capacity).map(|_| Mutex::new(None)).collect();
        let ring = Self {
            slots,
            write_pos: AtomicU64::new(0),
            capacity,
        };
        ring.push(first);
        ring
    }

    fn slot(&self, pos: u64) -> MutexGuard<'_, Slot> {
        // A reader panicking while holding a slot cannot leave it half
        // written, so a poisoned lock is still usable.
        self.slots[(pos as usize) % self.capacity]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Push a new snapshot. Single-producer only.
    ///
    /// Returns the snapshot displaced by this push, if any.
    pub fn push(&self, snapshot: GridSnapshot) -> Option<Arc<GridSnapshot>> {
        let pos = self.write_pos.load(Ordering::Relaxed);
        let evicted = self
            .slot(pos)
            .replace((pos, Arc::new(snapshot)))
            .map(|(_, old)| old);
        // Release-store publishes the slot before readers see the new position.
        self.write_pos.store(pos + 1, Ordering::Release);
        evicted
    }

    /// The most recently pushed snapshot.
    ///
    /// If the producer overwrites the slot between reading the position
    /// and taking the lock, the read is retried against the newer
    /// position.
    pub fn latest(&self) -> Arc<GridSnapshot> {
        loop {
            let target = self.write_pos.load(Ordering::Acquire) - 1;
            if let Some((tag, arc)) = self.slot(target).as_ref() {
                if *tag == target {
                    return Arc::clone(arc);
                }
            }
            std::hint::spin_loop();
        }
    }

    /// Number of snapshots currently stored (up to `capacity`).
    pub fn len(&self) -> usize {
        (self.write_pos.load(Ordering::Acquire) as usize).min(self.capacity)
    }

    /// Always `false`: the ring is seeded at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Maximum number of retained snapshots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of snapshots ever pushed.
    pub fn write_pos(&self) -> u64 {
        self.write_pos.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for SnapshotRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotRing")
            .field("capacity", &self.capacity)
            .field("write_pos", &self.write_pos())
            .finish()
    }
}
