//! Sampled relay evaluation.
//!
//! A relay with a sample period only looks at the temperature at discrete
//! sample times. Between samples the last decision is held (zero-order hold).

use serde::{Deserialize, Serialize};

use crate::error::ControlResult;

/// Fixed sample period of a relay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Sample period (s)
    pub period_s: f64,
}

impl SampleConfig {
    /// `period_s` must be finite and positive.
    pub fn new(period_s: f64) -> ControlResult<Self> {
        let period_s = ct_core::ensure_positive(period_s, "sample_period_s")?;
        Ok(Self { period_s })
    }
}

/// Tracks when the next sample is due.
///
/// The first sample is due at the start time, so the relay always acts on
/// the initial condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleClock {
    pub config: SampleConfig,
    pub next_sample_time: f64,
}

impl SampleClock {
    /// Slack for drift between accumulated step times and sample times.
    const TIME_EPS: f64 = 1e-9;

    pub fn new(config: SampleConfig, start_time: f64) -> Self {
        Self {
            config,
            next_sample_time: start_time,
        }
    }

    pub fn is_due(&self, t: f64) -> bool {
        t + Self::TIME_EPS * self.config.period_s.max(1.0) >= self.next_sample_time
    }

    /// Schedule the first sample strictly after `t`.
    ///
    /// Sample times the caller stepped over are dropped, not replayed.
    pub fn advance(&mut self, t: f64) {
        let period = self.config.period_s;
        let behind = ((t - self.next_sample_time) / period).floor();
        let skipped = if behind > 0.0 { behind } else { 0.0 };
        self.next_sample_time += period * (skipped + 1.0);
        if self.is_due(t) {
            // Rounding in the jump, or a period below the resolution of `t`.
            self.next_sample_time = (self.next_sample_time + period).max(t + period);
        }
    }
}
