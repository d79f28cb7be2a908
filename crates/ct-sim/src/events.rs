//! Heater switching history recorded during a run.

use ct_controls::SwitchState;

/// One relay transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwitchEvent {
    pub time_s: f64,
    pub state: SwitchState,
}

/// Relay state over a run: the state at the start plus every transition.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SwitchLog {
    pub start_time_s: f64,
    pub initial: SwitchState,
    pub events: Vec<SwitchEvent>,
}

impl SwitchLog {
    pub fn new(start_time_s: f64, initial: SwitchState) -> Self {
        Self {
            start_time_s,
            initial,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, time_s: f64, state: SwitchState) {
        self.events.push(SwitchEvent { time_s, state });
    }

    /// State in effect at `t` (events at exactly `t` included).
    pub fn state_at(&self, t: f64) -> SwitchState {
        self.events
            .iter()
            .take_while(|e| e.time_s <= t)
            .last()
            .map_or(self.initial, |e| e.state)
    }

    /// Number of off-to-on transitions.
    pub fn switch_on_count(&self) -> usize {
        self.events.iter().filter(|e| e.state.is_on()).count()
    }

    /// Total time the relay is on within `[from, to]` (s).
    pub fn on_time(&self, from: f64, to: f64) -> f64 {
        if to <= from {
            return 0.0;
        }
        let mut total = 0.0;
        let mut seg_start = self.start_time_s;
        let mut seg_state = self.initial;
        for event in &self.events {
            total += on_overlap(seg_state, seg_start, event.time_s, from, to);
            seg_start = event.time_s;
            seg_state = event.state;
        }
        total + on_overlap(seg_state, seg_start, f64::INFINITY, from, to)
    }
}

fn on_overlap(state: SwitchState, seg_start: f64, seg_end: f64, from: f64, to: f64) -> f64 {
    if !state.is_on() {
        return 0.0;
    }
    (seg_end.min(to) - seg_start.max(from)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> SwitchLog {
        let mut log = SwitchLog::new(0.0, SwitchState::Off);
        log.push(10.0, SwitchState::On);
        log.push(30.0, SwitchState::Off);
        log.push(50.0, SwitchState::On);
        log
    }

    #[test]
    fn state_at_follows_events() {
        let log = log();
        assert_eq!(log.state_at(0.0), SwitchState::Off);
        assert_eq!(log.state_at(10.0), SwitchState::On);
        assert_eq!(log.state_at(29.9), SwitchState::On);
        assert_eq!(log.state_at(30.0), SwitchState::Off);
        assert_eq!(log.state_at(1e6), SwitchState::On);
    }

    #[test]
    fn on_time_clips_to_window() {
        let log = log();
        assert!((log.on_time(0.0, 60.0) - 30.0).abs() < 1e-12);
        assert!((log.on_time(20.0, 40.0) - 10.0).abs() < 1e-12);
        assert_eq!(log.on_time(40.0, 40.0), 0.0);
        assert_eq!(log.switch_on_count(), 2);
    }
}
