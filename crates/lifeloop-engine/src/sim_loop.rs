//! The dual-rate simulation loop.
//!
//! [`SimulationLoop`] owns the [`GridEngine`] exclusively. Each
//! iteration drains the input channel, then checks the two timers:
//!
//! 1. render interval elapsed → ask the presenter to redraw
//! 2. running and update interval elapsed → step the grid
//! 3. otherwise, if paused → apply staged edits
//!
//! After any grid mutation a fresh snapshot is pushed to the ring.
//! Between iterations the loop thread parks until the nearest timer
//! deadline; an incoming input or a shutdown request unparks it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use lifeloop_core::{InputEvent, Presenter};
use lifeloop_grid::{GridEngine, GridSnapshot, Pattern, StepOutcome};
use tracing::{debug, info, warn};

use crate::clock::SimulationClock;
use crate::metrics::{LoopCounters, LoopMetrics};
use crate::ring::SnapshotRing;
use crate::state::RunState;

/// State shared between the loop thread and its host handle.
pub(crate) struct LoopShared {
    pub ring: SnapshotRing,
    pub counters: Arc<LoopCounters>,
    pub running: AtomicBool,
    pub shutdown: AtomicBool,
    pub stopped: AtomicBool,
}

impl LoopShared {
    fn new(ring: SnapshotRing) -> Self {
        Self {
            ring,
            counters: Arc::new(LoopCounters::default()),
            running: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
        }
    }
}

/// What one call to [`SimulationLoop::iterate`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Iteration {
    /// Input events drained.
    pub inputs: usize,
    /// Whether a redraw was requested.
    pub redraw_requested: bool,
    /// The timed step taken, if any.
    pub stepped: Option<StepOutcome>,
    /// Staged edits applied.
    pub edits_applied: usize,
    /// Whether a snapshot was published.
    pub published: bool,
}

/// The simulation loop: a grid engine, a presenter, two timers and an
/// input channel.
///
/// Drive it manually with [`iterate`](Self::iterate), or let a
/// [`SimulationWorld`](crate::SimulationWorld) run it on its own thread.
pub struct SimulationLoop<P> {
    engine: GridEngine,
    presenter: P,
    clock: SimulationClock,
    state: RunState,
    inputs: Receiver<InputEvent>,
    shared: Arc<LoopShared>,
    dirty: bool,
}

impl<P: Presenter> SimulationLoop<P> {
    /// Build a paused loop and publish the initial snapshot.
    ///
    /// # Panics
    ///
    /// Panics if `ring_size < 2`.
    pub fn new(
        mut engine: GridEngine,
        presenter: P,
        clock: SimulationClock,
        inputs: Receiver<InputEvent>,
        ring_size: usize,
    ) -> Self {
        let ring = SnapshotRing::new(ring_size, engine.draw_snapshot());
        let shared = Arc::new(LoopShared::new(ring));
        LoopCounters::bump(&shared.counters.snapshots_published);
        engine.set_edit_mode(true);
        Self {
            engine,
            presenter,
            clock,
            state: RunState::Paused,
            inputs,
            shared,
            dirty: false,
        }
    }

    pub(crate) fn shared(&self) -> &Arc<LoopShared> {
        &self.shared
    }

    /// Run one iteration at `now`.
    ///
    /// The same instant is used for the render check and the update
    /// check, so an iteration at a shared boundary both redraws and
    /// steps.
    pub fn iterate(&mut self, now: Instant) -> Iteration {
        let mut report = Iteration {
            inputs: self.drain_inputs(),
            ..Iteration::default()
        };

        if self.clock.render_due(now) {
            self.request_redraw();
            self.clock.mark_rendered(now);
            report.redraw_requested = true;
        }

        match self.state {
            RunState::Running => {
                if self.clock.update_due(now) {
                    report.stepped = Some(self.step());
                    self.clock.mark_updated(now);
                }
            }
            RunState::Paused => {
                report.edits_applied = self.apply_edits();
            }
        }

        report.published = self.publish_if_dirty();
        LoopCounters::bump(&self.shared.counters.iterations);
        report
    }

    /// Apply one input event immediately.
    pub fn handle_input(&mut self, event: InputEvent) {
        debug!(kind = event.kind(), state = %self.state, "input");
        match event {
            InputEvent::TogglePause => self.toggle_pause(),
            InputEvent::Reset => {
                self.engine.reset();
                self.dirty = true;
            }
            InputEvent::Select(point) => {
                if self.state.is_running() {
                    debug!(%point, "selection ignored while running");
                } else if self.engine.select_entity(point).is_some() {
                    self.dirty = true;
                }
            }
            InputEvent::Resize { width, height } => {
                self.engine.resize(width, height);
                self.dirty = true;
            }
            InputEvent::StepOnce => {
                if self.state.is_running() {
                    debug!("single step ignored while running");
                } else {
                    self.apply_edits();
                    self.step();
                }
            }
            InputEvent::SetUpdateInterval { millis } => {
                if millis == 0 {
                    warn!("rejected zero update interval");
                } else {
                    self.clock.set_update_interval(Duration::from_millis(millis));
                    info!(update_interval_ms = millis, "update interval changed");
                }
            }
            InputEvent::Randomize { seed, density } => {
                self.engine.seed_random(seed, density);
                self.dirty = true;
            }
            InputEvent::LoadPattern { name, origin } => match Pattern::find(&name) {
                Some(pattern) => {
                    self.engine.apply_pattern(pattern, origin);
                    self.dirty = true;
                }
                None => warn!(pattern = %name, "unknown pattern ignored"),
            },
        }
    }

    fn drain_inputs(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.inputs.try_recv() {
            self.handle_input(event);
            drained += 1;
        }
        if drained > 0 {
            LoopCounters::add(&self.shared.counters.inputs_processed, drained as u64);
        }
        drained
    }

    fn toggle_pause(&mut self) {
        match self.state {
            RunState::Paused => {
                // Flush staged edits before they stop being accepted.
                self.apply_edits();
                self.engine.set_edit_mode(false);
            }
            RunState::Running => self.engine.set_edit_mode(true),
        }
        self.state = self.state.toggled();
        self.shared
            .running
            .store(self.state.is_running(), Ordering::Release);
        info!(state = %self.state, tick = %self.engine.tick(), "run state changed");
    }

    fn step(&mut self) -> StepOutcome {
        let started = Instant::now();
        let outcome = self.engine.step();
        let counters = &self.shared.counters;
        LoopCounters::bump(&counters.steps);
        LoopCounters::set(&counters.last_step_us, started.elapsed().as_micros() as u64);
        LoopCounters::set(&counters.last_live, outcome.live as u64);
        self.dirty = true;
        outcome
    }

    fn apply_edits(&mut self) -> usize {
        let applied = self.engine.update_marked_entities();
        if applied > 0 {
            LoopCounters::add(&self.shared.counters.edits_applied, applied as u64);
            self.dirty = true;
        }
        applied
    }

    fn request_redraw(&self) {
        let counters = &self.shared.counters;
        let presenter = &self.presenter;
        match panic::catch_unwind(AssertUnwindSafe(|| presenter.request_redraw())) {
            Ok(Ok(())) => LoopCounters::bump(&counters.redraws),
            Ok(Err(err)) => {
                LoopCounters::bump(&counters.redraw_failures);
                warn!(%err, "redraw request failed");
            }
            Err(payload) => {
                LoopCounters::bump(&counters.redraw_panics);
                warn!(reason = panic_message(payload.as_ref()), "presenter panicked during redraw");
            }
        }
    }

    fn publish_if_dirty(&mut self) -> bool {
        if !std::mem::take(&mut self.dirty) {
            return false;
        }
        self.shared.ring.push(self.engine.draw_snapshot());
        LoopCounters::bump(&self.shared.counters.snapshots_published);
        true
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The grid engine.
    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    /// The timers.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The most recently published snapshot.
    pub fn latest_snapshot(&self) -> Arc<GridSnapshot> {
        self.shared.ring.latest()
    }

    /// Counters so far.
    pub fn metrics(&self) -> LoopMetrics {
        self.shared.counters.report()
    }

    /// When the next timer falls due.
    pub fn next_deadline(&self) -> Instant {
        self.clock.next_deadline(self.state)
    }

    /// Iterate until the shared shutdown flag is set, then hand the
    /// engine back.
    pub(crate) fn run(mut self) -> GridEngine {
        debug!("simulation loop running");
        while !self.shared.shutdown.load(Ordering::Acquire) {
            self.iterate(Instant::now());
            let wait = self
                .next_deadline()
                .saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                std::thread::park_timeout(wait);
            }
        }
        self.shared.stopped.store(true, Ordering::Release);
        debug!(tick = %self.engine.tick(), "simulation loop stopped");
        self.engine
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeloop_core::{CellCoord, GridView, PixelPoint, TickId};
    use lifeloop_rule::LifeLike;
    use lifeloop_space::TileSize;
    use lifeloop_test_utils::{FailingPresenter, RecordingPresenter};
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    struct Harness<P> {
        sim: SimulationLoop<P>,
        tx: crossbeam_channel::Sender<InputEvent>,
        t0: Instant,
    }

    impl<P: Presenter> Harness<P> {
        fn with(presenter: P) -> Self {
            let engine = GridEngine::new(320, 240, TileSize::square(20), Box::new(LifeLike::conway()));
            let (tx, rx) = crossbeam_channel::bounded(32);
            let t0 = Instant::now();
            let clock = SimulationClock::new(ms(16), ms(100), t0);
            Self {
                sim: SimulationLoop::new(engine, presenter, clock, rx, 4),
                tx,
                t0,
            }
        }

        fn at(&mut self, millis: u64) -> Iteration {
            self.sim.iterate(self.t0 + ms(millis))
        }

        fn send(&self, event: InputEvent) {
            self.tx.send(event).unwrap();
        }
    }

    fn harness() -> Harness<RecordingPresenter> {
        Harness::with(RecordingPresenter::new())
    }

    #[test]
    fn starts_paused_with_initial_snapshot() {
        let h = harness();
        assert_eq!(h.sim.state(), RunState::Paused);
        assert!(h.sim.engine().edit_mode());
        let snap = h.sim.latest_snapshot();
        assert_eq!((snap.columns(), snap.rows()), (16, 12));
        assert_eq!(h.sim.metrics().snapshots_published, 1);
    }

    #[test]
    fn redraw_every_render_interval_in_both_states() {
        let mut h = harness();
        let presenter = h.sim.presenter().clone();
        assert!(!h.at(0).redraw_requested);
        assert!(h.at(16).redraw_requested);
        assert!(!h.at(20).redraw_requested);
        assert!(h.at(32).redraw_requested);
        h.send(InputEvent::TogglePause);
        h.at(33);
        assert!(h.at(48).redraw_requested);
        assert_eq!(presenter.redraws(), 3);
    }

    #[test]
    fn paused_never_steps() {
        let mut h = harness();
        for t in (0..1000).step_by(10) {
            assert!(h.at(t).stepped.is_none());
        }
        assert_eq!(h.sim.engine().tick(), TickId(0));
    }

    #[test]
    fn running_steps_once_per_update_interval() {
        let mut h = harness();
        h.send(InputEvent::TogglePause);
        assert!(h.at(0).stepped.is_none());
        assert!(h.at(50).stepped.is_none());
        assert_eq!(h.at(100).stepped.map(|o| o.tick), Some(TickId(1)));
        assert!(h.at(150).stepped.is_none());
        assert!(h.at(199).stepped.is_none());
        assert!(h.at(200).stepped.is_some());
        assert_eq!(h.sim.metrics().steps, 2);
    }

    #[test]
    fn paused_applies_edits_every_iteration() {
        let mut h = harness();
        h.send(InputEvent::Select(PixelPoint::new(10, 10)));
        let it = h.at(1);
        assert_eq!(it.inputs, 1);
        assert_eq!(it.edits_applied, 1);
        assert!(it.published);
        assert!(h.sim.latest_snapshot().is_alive(CellCoord::new(0, 0)));

        let it = h.at(2);
        assert_eq!(it.edits_applied, 0);
        assert!(!it.published);
    }

    #[test]
    fn select_ignored_while_running() {
        let mut h = harness();
        h.send(InputEvent::TogglePause);
        h.send(InputEvent::Select(PixelPoint::new(10, 10)));
        h.at(1);
        assert_eq!(h.sim.engine().pending_edits(), 0);
        assert_eq!(h.sim.engine().live_count(), 0);
    }

    #[test]
    fn toggle_to_running_flushes_staged_edits() {
        let mut h = harness();
        // Select and resume in the same drain: the edit is staged, then
        // flushed by the transition, before the timers are checked.
        h.send(InputEvent::Select(PixelPoint::new(30, 10)));
        h.send(InputEvent::TogglePause);
        let it = h.at(1);
        assert_eq!(it.edits_applied, 0);
        assert!(h.sim.engine().is_alive(CellCoord::new(1, 0)));
        assert_eq!(h.sim.state(), RunState::Running);
        assert_eq!(h.sim.metrics().edits_applied, 1);
    }

    #[test]
    fn reset_and_resize_keep_run_state() {
        let mut h = harness();
        h.send(InputEvent::Randomize { seed: 3, density: 0.5 });
        h.send(InputEvent::TogglePause);
        h.send(InputEvent::Reset);
        h.at(1);
        assert_eq!(h.sim.state(), RunState::Running);
        assert_eq!(h.sim.latest_snapshot().live_count(), 0);

        h.send(InputEvent::Resize { width: 100, height: 60 });
        h.at(2);
        assert_eq!(h.sim.state(), RunState::Running);
        let snap = h.sim.latest_snapshot();
        assert_eq!((snap.columns(), snap.rows()), (5, 3));
    }

    #[test]
    fn step_once_only_while_paused() {
        let mut h = harness();
        h.send(InputEvent::LoadPattern {
            name: "blinker".into(),
            origin: CellCoord::new(4, 4),
        });
        h.send(InputEvent::StepOnce);
        h.at(1);
        assert_eq!(h.sim.engine().tick(), TickId(1));
        assert!(h.sim.latest_snapshot().is_alive(CellCoord::new(5, 3)));

        h.send(InputEvent::TogglePause);
        h.send(InputEvent::StepOnce);
        h.at(2);
        assert_eq!(h.sim.engine().tick(), TickId(1));
    }

    #[test]
    fn unknown_pattern_and_zero_interval_are_ignored() {
        let mut h = harness();
        h.send(InputEvent::LoadPattern {
            name: "spaceship-of-theseus".into(),
            origin: CellCoord::new(0, 0),
        });
        h.send(InputEvent::SetUpdateInterval { millis: 0 });
        let it = h.at(1);
        assert_eq!(it.inputs, 2);
        assert!(!it.published);
        assert_eq!(h.sim.clock().update_interval(), ms(100));

        h.send(InputEvent::SetUpdateInterval { millis: 40 });
        h.at(2);
        assert_eq!(h.sim.clock().update_interval(), ms(40));
    }

    #[test]
    fn redraw_errors_and_panics_do_not_stop_the_loop() {
        let mut h = Harness::with(FailingPresenter::erroring());
        h.send(InputEvent::TogglePause);
        for t in (0..=200).step_by(16) {
            h.at(t);
        }
        let m = h.sim.metrics();
        assert!(m.redraw_failures > 0);
        assert_eq!(m.redraws, 0);
        assert_eq!(m.steps, 1);

        let mut h = Harness::with(FailingPresenter::panicking());
        h.send(InputEvent::TogglePause);
        for t in (0..=200).step_by(16) {
            h.at(t);
        }
        let m = h.sim.metrics();
        assert!(m.redraw_panics > 0);
        assert_eq!(m.steps, 1);
    }

    #[test]
    fn one_instant_drives_both_timers() {
        let mut h = harness();
        h.send(InputEvent::TogglePause);
        h.at(0);
        let it = h.at(100);
        assert!(it.redraw_requested);
        assert!(it.stepped.is_some());
    }

    proptest! {
        #[test]
        fn timers_fire_exactly_when_due(gaps in proptest::collection::vec(1u64..60, 1..80)) {
            let mut h = harness();
            h.send(InputEvent::TogglePause);
            h.at(0);

            let (mut t, mut last_render, mut last_update) = (0, 0, 0);
            for gap in gaps {
                t += gap;
                let it = h.at(t);
                prop_assert_eq!(it.redraw_requested, t - last_render >= 16);
                prop_assert_eq!(it.stepped.is_some(), t - last_update >= 100);
                if it.redraw_requested {
                    last_render = t;
                }
                if it.stepped.is_some() {
                    last_update = t;
                }
            }
        }
    }

    #[test]
    fn deadline_tracks_state() {
        let mut h = harness();
        assert_eq!(h.sim.next_deadline(), h.t0 + ms(16));
        h.send(InputEvent::SetUpdateInterval { millis: 5 });
        h.send(InputEvent::TogglePause);
        h.at(1);
        assert_eq!(h.sim.next_deadline(), h.t0 + ms(5));
    }
}
