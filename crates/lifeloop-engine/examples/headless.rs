//! Headless demo: run a glider on a terminal-sized board and print a
//! few frames as ASCII.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p lifeloop-engine --example headless
//! cargo run -p lifeloop-engine --example headless -- lifeloop.yaml
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lifeloop_core::{CellCoord, GridView, InputEvent, Presenter, RenderError};
use lifeloop_engine::{SimulationConfig, SimulationWorld};
use tracing_subscriber::EnvFilter;

/// Raises a flag; the main thread repaints when it sees it.
#[derive(Clone, Default)]
struct FlagPresenter {
    dirty: Arc<AtomicBool>,
}

impl Presenter for FlagPresenter {
    fn request_redraw(&self) -> Result<(), RenderError> {
        self.dirty.store(true, Ordering::Release);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_file(Path::new(&path))?,
        None => {
            let mut config = SimulationConfig::new(240, 120, "headless", 24, 12, 120);
            config.apply_env_overrides();
            config
        }
    };

    let presenter = FlagPresenter::default();
    let mut world = SimulationWorld::new(config, presenter.clone())?;
    let input = world.input();
    input.send(InputEvent::LoadPattern {
        name: "glider".into(),
        origin: CellCoord::new(1, 1),
    })?;
    input.toggle_pause()?;

    let mut last_tick = None;
    let mut frames = 0;
    while frames < 12 {
        std::thread::sleep(Duration::from_millis(5));
        if !presenter.dirty.swap(false, Ordering::AcqRel) {
            continue;
        }
        let snap = world.draw_snapshot();
        if last_tick == Some(snap.tick_id()) {
            continue;
        }
        last_tick = Some(snap.tick_id());
        frames += 1;
        println!("tick {} · {} alive · {}", snap.tick_id(), snap.live_count(), snap.rule_name());
        print!("{snap}");
        println!();
    }

    let report = world.shutdown();
    println!(
        "stopped after {} steps, {} redraw requests",
        report.metrics.steps, report.metrics.redraws
    );
    Ok(())
}
