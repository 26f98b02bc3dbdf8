//! Render and update timers.

use std::time::{Duration, Instant};

use crate::state::RunState;

/// Two independent interval timers driven by caller-supplied instants.
///
/// The clock never reads the system time itself, so the loop can be
/// driven deterministically in tests.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    render_interval: Duration,
    update_interval: Duration,
    last_render: Instant,
    last_update: Instant,
}

impl SimulationClock {
    /// Both timers start at `now`.
    pub fn new(render_interval: Duration, update_interval: Duration, now: Instant) -> Self {
        Self {
            render_interval,
            update_interval,
            last_render: now,
            last_update: now,
        }
    }

    /// Whether at least one render interval has passed since the last redraw.
    pub fn render_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_render) >= self.render_interval
    }

    /// Whether at least one update interval has passed since the last step.
    pub fn update_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_update) >= self.update_interval
    }

    /// Record a redraw request at `now`.
    pub fn mark_rendered(&mut self, now: Instant) {
        self.last_render = now;
    }

    /// Record a step at `now`.
    pub fn mark_updated(&mut self, now: Instant) {
        self.last_update = now;
    }

    /// The earliest instant at which either timer is due.
    ///
    /// The update timer only counts while running.
    pub fn next_deadline(&self, state: RunState) -> Instant {
        let render = self.last_render + self.render_interval;
        match state {
            RunState::Running => render.min(self.last_update + self.update_interval),
            RunState::Paused => render,
        }
    }

    /// Minimum time between redraw requests.
    pub fn render_interval(&self) -> Duration {
        self.render_interval
    }

    /// Minimum time between steps.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Change the step interval. The last step time is kept.
    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timers_are_independent() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(ms(16), ms(100), t0);
        assert!(!clock.render_due(t0));
        assert!(clock.render_due(t0 + ms(16)));
        assert!(!clock.update_due(t0 + ms(99)));
        assert!(clock.update_due(t0 + ms(100)));

        clock.mark_rendered(t0 + ms(16));
        assert!(!clock.render_due(t0 + ms(31)));
        assert!(clock.update_due(t0 + ms(100)));
    }

    #[test]
    fn instants_before_the_last_mark_are_not_due() {
        let t0 = Instant::now();
        let clock = SimulationClock::new(ms(16), ms(100), t0 + ms(50));
        assert!(!clock.render_due(t0));
        assert!(!clock.update_due(t0));
    }

    #[test]
    fn deadline_ignores_update_timer_while_paused() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(ms(16), ms(5), t0);
        assert_eq!(clock.next_deadline(RunState::Paused), t0 + ms(16));
        assert_eq!(clock.next_deadline(RunState::Running), t0 + ms(5));

        clock.set_update_interval(ms(40));
        clock.mark_updated(t0 + ms(10));
        assert_eq!(clock.next_deadline(RunState::Running), t0 + ms(16));
        assert_eq!(clock.update_interval(), ms(40));
    }
}
