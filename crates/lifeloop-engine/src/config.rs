//! Simulation configuration, loading, validation and error types.
//!
//! [`SimulationConfig`] mirrors the constructor arguments of a
//! simulation (display size, title, tile counts, update interval) plus
//! the loop's tuning knobs. It can be built in code or loaded from YAML;
//! every field has a default.

use std::path::Path;
use std::time::{Duration, Instant};

use lifeloop_core::RuleParseError;
use lifeloop_grid::GridEngine;
use lifeloop_rule::parse_rule;
use lifeloop_space::{EdgeBehavior, TileSize};
use serde::Deserialize;
use tracing::warn;

use crate::clock::SimulationClock;

/// Environment variable overriding [`SimulationConfig::update_interval_ms`].
pub const ENV_UPDATE_INTERVAL_MS: &str = "LIFELOOP_UPDATE_INTERVAL_MS";
/// Environment variable overriding [`SimulationConfig::rule`].
pub const ENV_RULE: &str = "LIFELOOP_RULE";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating a configuration, or
/// while starting or stopping the simulation thread.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
    /// `update_interval_ms` is zero.
    #[error("update interval must be at least 1 ms")]
    ZeroUpdateInterval,
    /// `render_interval_ms` is zero.
    #[error("render interval must be at least 1 ms")]
    ZeroRenderInterval,
    /// `input_queue_capacity` is zero.
    #[error("input queue capacity must be at least 1")]
    InputQueueZero,
    /// Snapshot ring is below the minimum of 2.
    #[error("snapshot ring size must be at least 2, got {configured}")]
    RingBufferTooSmall {
        /// The configured size that was too small.
        configured: usize,
    },
    /// The rule string is not a preset name or a valid rulestring.
    #[error("invalid rule: {0}")]
    Rule(#[from] RuleParseError),
    /// The loop thread could not be started.
    #[error("failed to spawn simulation thread: {source}")]
    ThreadSpawn {
        /// The underlying OS error.
        source: std::io::Error,
    },
    /// The grid engine could not be recovered from the loop thread,
    /// typically because the thread panicked.
    #[error("grid engine could not be recovered from the simulation thread")]
    EngineRecoveryFailed,
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Everything needed to start a simulation.
///
/// Geometry values are never rejected: negative sizes clamp to an empty
/// grid and a tile count of zero or less yields an empty grid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Display width in pixels. Default: 320.
    pub width: i64,
    /// Display height in pixels. Default: 240.
    pub height: i64,
    /// Window title, passed through to the presentation layer.
    pub title: String,
    /// Tiles across the initial display. Default: 16.
    pub tiles_x: i64,
    /// Tiles down the initial display. Default: 12.
    pub tiles_y: i64,
    /// Minimum milliseconds between steps. Default: 100.
    pub update_interval_ms: u64,
    /// Minimum milliseconds between redraw requests. Default: 16.
    pub render_interval_ms: u64,
    /// Rulestring or preset name. Default: `B3/S23`.
    pub rule: String,
    /// Neighbour handling at the grid border. Default: absorb.
    pub edge: EdgeBehavior,
    /// Bounded input channel capacity. Default: 256.
    pub input_queue_capacity: usize,
    /// Number of snapshots retained for readers. Default: 4.
    pub ring_buffer_size: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            title: "Lifeloop".to_string(),
            tiles_x: 16,
            tiles_y: 12,
            update_interval_ms: 100,
            render_interval_ms: 16,
            rule: "B3/S23".to_string(),
            edge: EdgeBehavior::default(),
            input_queue_capacity: 256,
            ring_buffer_size: 4,
        }
    }
}

impl SimulationConfig {
    /// Configuration from the six construction parameters; every other
    /// field takes its default.
    pub fn new(
        width: i64,
        height: i64,
        title: impl Into<String>,
        tiles_x: i64,
        tiles_y: i64,
        update_interval_ms: u64,
    ) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            tiles_x,
            tiles_y,
            update_interval_ms,
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// - `LIFELOOP_UPDATE_INTERVAL_MS` overrides `update_interval_ms`
    /// - `LIFELOOP_RULE` overrides `rule`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `LIFELOOP_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(ENV_UPDATE_INTERVAL_MS) {
            match val.trim().parse() {
                Ok(ms) => self.update_interval_ms = ms,
                Err(_) => warn!(
                    variable = ENV_UPDATE_INTERVAL_MS,
                    value = %val,
                    "ignoring non-numeric override"
                ),
            }
        }
        if let Some(val) = lookup(ENV_RULE) {
            self.rule = val;
        }
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Zero intervals, a zero-capacity input queue, a ring smaller than
    /// two, or an unparseable rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroUpdateInterval);
        }
        if self.render_interval_ms == 0 {
            return Err(ConfigError::ZeroRenderInterval);
        }
        if self.input_queue_capacity == 0 {
            return Err(ConfigError::InputQueueZero);
        }
        if self.ring_buffer_size < 2 {
            return Err(ConfigError::RingBufferTooSmall {
                configured: self.ring_buffer_size,
            });
        }
        parse_rule(&self.rule)?;
        Ok(())
    }

    /// Tile size implied by the display area and tile counts.
    pub fn tile_size(&self) -> TileSize {
        TileSize::from_counts(self.width, self.height, self.tiles_x, self.tiles_y)
    }

    /// Minimum time between steps.
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    /// Minimum time between redraw requests.
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }

    /// A grid engine for this configuration, all cells dead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Rule`] if the rule does not parse.
    pub fn build_engine(&self) -> Result<GridEngine, ConfigError> {
        let rule = parse_rule(&self.rule)?;
        Ok(GridEngine::new(self.width, self.height, self.tile_size(), rule).with_edge(self.edge))
    }

    /// Timers for this configuration, both started at `now`.
    pub fn clock(&self, now: Instant) -> SimulationClock {
        SimulationClock::new(self.render_interval(), self.update_interval(), now)
    }
}
