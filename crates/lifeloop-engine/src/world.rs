//! User-facing [`SimulationWorld`] handle and shutdown sequence.
//!
//! ```text
//! Presentation thread              Loop thread ("lifeloop-sim")
//!     |                                 |
//!     |--input().send(event)----------->| inputs.try_recv()
//!     |   [bounded channel] + unpark    | handle_input()
//!     |                                 | render due? presenter.request_redraw()
//!     |<--------request_redraw()--------| running & update due? engine.step()
//!     |                                 | paused? update_marked_entities()
//!     |--draw_snapshot()--> ring.latest | ring.push(snapshot) if dirty
//!     |                                 | park_timeout(next deadline)
//! ```

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use lifeloop_core::{GridView, InputEvent, PixelPoint, Presenter};
use lifeloop_grid::{GridEngine, GridSnapshot};
use tracing::{info, warn};

use crate::config::{ConfigError, SimulationConfig};
use crate::ingress::{InputSender, SubmitError};
use crate::metrics::LoopMetrics;
use crate::sim_loop::{LoopShared, SimulationLoop};
use crate::state::RunState;

/// How long shutdown waits for the loop to acknowledge before joining.
const DRAIN_BUDGET: Duration = Duration::from_millis(250);

/// Report from [`SimulationWorld::shutdown`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Total time spent in the shutdown sequence.
    pub total_ms: u64,
    /// Time spent waiting for the loop to notice the shutdown flag.
    pub drain_ms: u64,
    /// Whether the loop thread was joined and the engine recovered.
    pub loop_joined: bool,
    /// Counters at the moment the loop stopped.
    pub metrics: LoopMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownState {
    Running,
    Draining,
    Dropped,
}

/// A simulation running on its own thread.
///
/// Created from a [`SimulationConfig`] and a [`Presenter`]. The grid
/// engine is moved into the loop thread; the presentation layer talks
/// to it only through inputs and published snapshots. Dropping the
/// handle shuts the loop down.
pub struct SimulationWorld {
    title: String,
    sender: InputSender,
    shared: Arc<LoopShared>,
    loop_thread: Option<JoinHandle<GridEngine>>,
    state: ShutdownState,
    recovered_engine: Option<GridEngine>,
}

impl SimulationWorld {
    /// Validate `config`, build the grid and start the loop thread.
    ///
    /// The simulation starts paused.
    pub fn new<P: Presenter + 'static>(
        config: SimulationConfig,
        presenter: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = config.build_engine()?;
        info!(
            title = %config.title,
            columns = engine.columns(),
            rows = engine.rows(),
            rule = engine.rule_name(),
            update_interval_ms = config.update_interval_ms,
            render_interval_ms = config.render_interval_ms,
            "simulation world started"
        );

        let (tx, rx) = crossbeam_channel::bounded(config.input_queue_capacity);
        let sim = SimulationLoop::new(
            engine,
            presenter,
            config.clock(Instant::now()),
            rx,
            config.ring_buffer_size,
        );
        let shared = Arc::clone(sim.shared());

        let loop_thread = thread::Builder::new()
            .name("lifeloop-sim".into())
            .spawn(move || sim.run())
            .map_err(|source| ConfigError::ThreadSpawn { source })?;

        let sender = InputSender::new(
            tx,
            loop_thread.thread().clone(),
            Arc::clone(&shared.counters),
        );

        Ok(Self {
            title: config.title,
            sender,
            shared,
            loop_thread: Some(loop_thread),
            state: ShutdownState::Running,
            recovered_engine: None,
        })
    }

    /// A cloneable sender for input callbacks.
    pub fn input(&self) -> InputSender {
        self.sender.clone()
    }

    /// Flip between paused and running.
    pub fn toggle_pause(&self) -> Result<(), SubmitError> {
        self.sender.send(InputEvent::TogglePause)
    }

    /// Clear the grid. The run state is unchanged.
    pub fn reset(&self) -> Result<(), SubmitError> {
        self.sender.send(InputEvent::Reset)
    }

    /// Click at a display position. Ignored while running.
    pub fn select(&self, x: i32, y: i32) -> Result<(), SubmitError> {
        self.sender.send(InputEvent::Select(PixelPoint::new(x, y)))
    }

    /// The display area changed size.
    pub fn resize(&self, width: i64, height: i64) -> Result<(), SubmitError> {
        self.sender.send(InputEvent::Resize { width, height })
    }

    /// Advance one generation while paused.
    pub fn step_once(&self) -> Result<(), SubmitError> {
        self.sender.send(InputEvent::StepOnce)
    }

    /// The most recently published snapshot.
    pub fn draw_snapshot(&self) -> Arc<GridSnapshot> {
        self.shared.ring.latest()
    }

    /// Current run state (lock-free read).
    pub fn run_state(&self) -> RunState {
        RunState::from(self.shared.running.load(Ordering::Acquire))
    }

    /// Loop counters so far.
    pub fn metrics(&self) -> LoopMetrics {
        self.shared.counters.report()
    }

    /// The configured window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the loop thread is still running.
    pub fn is_running(&self) -> bool {
        self.state == ShutdownState::Running
    }

    /// Stop the loop thread and recover the grid engine.
    ///
    /// 1. **Running → Draining:** set the shutdown flag and unpark the
    ///    loop so it leaves its interval sleep immediately.
    /// 2. **Draining → Dropped:** join the thread.
    ///
    /// Idempotent: later calls return an empty report.
    pub fn shutdown(&mut self) -> ShutdownReport {
        if self.state == ShutdownState::Dropped {
            return ShutdownReport {
                total_ms: 0,
                drain_ms: 0,
                loop_joined: true,
                metrics: self.metrics(),
            };
        }

        let start = Instant::now();
        self.state = ShutdownState::Draining;
        self.shared.shutdown.store(true, Ordering::Release);
        if let Some(handle) = &self.loop_thread {
            handle.thread().unpark();
        }

        let deadline = start + DRAIN_BUDGET;
        while !self.shared.stopped.load(Ordering::Acquire) && Instant::now() < deadline {
            thread::yield_now();
        }
        let drain_ms = start.elapsed().as_millis() as u64;

        self.state = ShutdownState::Dropped;
        let loop_joined = match self.loop_thread.take().map(JoinHandle::join) {
            Some(Ok(engine)) => {
                self.recovered_engine = Some(engine);
                true
            }
            Some(Err(_)) => {
                warn!("simulation thread panicked");
                false
            }
            None => true,
        };

        let report = ShutdownReport {
            total_ms: start.elapsed().as_millis() as u64,
            drain_ms,
            loop_joined,
            metrics: self.metrics(),
        };
        info!(
            total_ms = report.total_ms,
            steps = report.metrics.steps,
            joined = loop_joined,
            "simulation world stopped"
        );
        report
    }

    /// Shut down and take back the grid engine.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EngineRecoveryFailed`] if the loop thread panicked.
    pub fn into_engine(mut self) -> Result<GridEngine, ConfigError> {
        self.shutdown();
        self.recovered_engine
            .take()
            .ok_or(ConfigError::EngineRecoveryFailed)
    }
}

impl Drop for SimulationWorld {
    fn drop(&mut self) {
        if self.state != ShutdownState::Dropped {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for SimulationWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationWorld")
            .field("title", &self.title)
            .field("state", &self.state)
            .field("run_state", &self.run_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeloop_core::{CellCoord, TickId};
    use lifeloop_test_utils::RecordingPresenter;

    fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    fn world() -> SimulationWorld {
        let config = SimulationConfig::new(320, 240, "test", 16, 12, 20);
        SimulationWorld::new(config, RecordingPresenter::new()).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            render_interval_ms: 0,
            ..SimulationConfig::default()
        };
        let err = SimulationWorld::new(config, RecordingPresenter::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRenderInterval));
    }

    #[test]
    fn starts_paused_with_dead_grid() {
        let world = world();
        assert_eq!(world.run_state(), RunState::Paused);
        let snap = world.draw_snapshot();
        assert_eq!((snap.columns(), snap.rows()), (16, 12));
        assert_eq!(snap.live_count(), 0);
        assert_eq!(world.title(), "test");
    }

    #[test]
    fn select_while_paused_becomes_alive() {
        let world = world();
        world.select(10, 10).unwrap();
        assert!(wait_for(|| world.draw_snapshot().is_alive(CellCoord::new(0, 0))));
    }

    #[test]
    fn runs_and_pauses() {
        let world = world();
        world.toggle_pause().unwrap();
        assert!(wait_for(|| world.run_state() == RunState::Running));
        assert!(wait_for(|| world.draw_snapshot().tick_id() >= TickId(2)));
        world.toggle_pause().unwrap();
        assert!(wait_for(|| world.run_state() == RunState::Paused));
    }

    #[test]
    fn presenter_is_asked_to_redraw() {
        let presenter = RecordingPresenter::new();
        let config = SimulationConfig::new(320, 240, "test", 16, 12, 100);
        let world = SimulationWorld::new(config, presenter.clone()).unwrap();
        assert!(wait_for(|| presenter.redraws() >= 3));
        drop(world);
    }

    #[test]
    fn shutdown_recovers_engine_and_rejects_inputs() {
        let mut world = world();
        world.resize(100, 100).unwrap();
        assert!(wait_for(|| world.draw_snapshot().columns() == 5));

        let report = world.shutdown();
        assert!(report.loop_joined);
        assert!(report.total_ms < 5_000);
        assert!(!world.is_running());
        assert_eq!(world.toggle_pause(), Err(SubmitError::Shutdown));

        let again = world.shutdown();
        assert_eq!(again.total_ms, 0);

        let engine = world.into_engine().unwrap();
        assert_eq!(engine.columns(), 5);
    }
}
