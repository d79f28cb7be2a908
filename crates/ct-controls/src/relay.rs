//! Two-position heater relay with hysteresis.
//!
//! The relay switches the heater **on** when the controlled temperature falls
//! to the low threshold or below, and **off** when it rises to the high
//! threshold or above. Between the thresholds the previous state is kept, which
//! prevents chatter around a single setpoint.

use ct_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// On/off state of a relay-driven device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchState {
    #[default]
    Off,
    On,
}

impl SwitchState {
    pub fn is_on(self) -> bool {
        matches!(self, SwitchState::On)
    }
}

/// Hysteresis band of a heating relay, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HysteresisRelay {
    /// Temperature at or below which the relay closes.
    pub low_c: f64,
    /// Temperature at or above which the relay opens.
    pub high_c: f64,
}

impl HysteresisRelay {
    pub const DEFAULT_LOW_C: f64 = 15.0;
    pub const DEFAULT_HIGH_C: f64 = 20.0;

    /// Create a relay band. Requires finite thresholds with `low_c < high_c`.
    pub fn new(low_c: f64, high_c: f64) -> ControlResult<Self> {
        let low_c = ensure_finite(low_c, "low_threshold_c")?;
        let high_c = ensure_finite(high_c, "high_threshold_c")?;
        if low_c >= high_c {
            return Err(ControlError::InvertedThresholds { low_c, high_c });
        }
        Ok(Self { low_c, high_c })
    }

    /// Pure transition rule.
    ///
    /// - `Off` and `temperature_c <= low_c` gives `On`.
    /// - `On` and `temperature_c >= high_c` gives `Off`.
    /// - Otherwise `previous` is returned unchanged.
    #[must_use]
    pub fn next_state(&self, previous: SwitchState, temperature_c: f64) -> SwitchState {
        match previous {
            SwitchState::Off => {
                if temperature_c <= self.low_c {
                    SwitchState::On
                } else {
                    SwitchState::Off
                }
            }
            SwitchState::On => {
                if temperature_c >= self.high_c {
                    SwitchState::Off
                } else {
                    SwitchState::On
                }
            }
        }
    }
}

impl Default for HysteresisRelay {
    fn default() -> Self {
        Self {
            low_c: Self::DEFAULT_LOW_C,
            high_c: Self::DEFAULT_HIGH_C,
        }
    }
}

/// Heater controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaterState {
    pub switch: SwitchState,
}

impl HeaterState {
    pub fn new(switch: SwitchState) -> Self {
        Self { switch }
    }
}

/// Thermostatic heater: a relay band driving a fixed-power element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaterRelay {
    pub relay: HysteresisRelay,
    /// Heater power when the relay is closed (W).
    pub power_w: f64,
}

impl HeaterRelay {
    /// Create a heater. `power_w` must be finite and non-negative.
    pub fn new(relay: HysteresisRelay, power_w: f64) -> ControlResult<Self> {
        let power_w = ct_core::ensure_non_negative(power_w, "heater_power_w")?;
        Ok(Self { relay, power_w })
    }

    /// Heat delivered in the given state (W).
    pub fn output_w(&self, state: &HeaterState) -> f64 {
        if state.switch.is_on() { self.power_w } else { 0.0 }
    }

    /// Evaluate one transition against the controlled temperature.
    ///
    /// # Returns
    ///
    /// Updated state and the heater output for that state.
    pub fn update(&self, state: &HeaterState, temperature_c: f64) -> (HeaterState, f64) {
        let next = HeaterState {
            switch: self.relay.next_state(state.switch, temperature_c),
        };
        let output = self.output_w(&next);
        (next, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heater() -> HeaterRelay {
        HeaterRelay::new(HysteresisRelay::default(), 2.5).unwrap()
    }

    #[test]
    fn scripted_sequence_matches_hysteresis() {
        let heater = heater();
        let temps = [25.0, 18.0, 14.0, 16.0, 21.0, 17.0];
        let expected = [
            SwitchState::Off,
            SwitchState::Off,
            SwitchState::On,
            SwitchState::On,
            SwitchState::Off,
            SwitchState::Off,
        ];

        let mut state = HeaterState::new(SwitchState::Off);
        let mut seen = Vec::new();
        for t in temps {
            let (next, _) = heater.update(&state, t);
            state = next;
            seen.push(state.switch);
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn turns_on_at_low_threshold() {
        let relay = HysteresisRelay::default();
        assert_eq!(relay.next_state(SwitchState::Off, 15.0), SwitchState::On);
        assert_eq!(relay.next_state(SwitchState::Off, 15.1), SwitchState::Off);
    }

    #[test]
    fn turns_off_at_high_threshold() {
        let relay = HysteresisRelay::default();
        assert_eq!(relay.next_state(SwitchState::On, 20.0), SwitchState::Off);
        assert_eq!(relay.next_state(SwitchState::On, 19.9), SwitchState::On);
    }

    #[test]
    fn output_follows_state() {
        let heater = heater();
        let (state, out) = heater.update(&HeaterState::new(SwitchState::Off), 10.0);
        assert_eq!(state.switch, SwitchState::On);
        assert_eq!(out, 2.5);

        let (state, out) = heater.update(&state, 30.0);
        assert_eq!(state.switch, SwitchState::Off);
        assert_eq!(out, 0.0);
    }

    #[test]
    fn inverted_band_rejected() {
        let err = HysteresisRelay::new(20.0, 15.0).unwrap_err();
        assert_eq!(
            err,
            ControlError::InvertedThresholds {
                low_c: 20.0,
                high_c: 15.0
            }
        );
        assert!(HysteresisRelay::new(18.0, 18.0).is_err());
    }

    #[test]
    fn negative_power_rejected() {
        let err = HeaterRelay::new(HysteresisRelay::default(), -1.0).unwrap_err();
        assert!(matches!(
            err,
            ControlError::InvalidArg {
                what: "heater_power_w",
                ..
            }
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn dead_band_never_switches(
            t in 15.000_001_f64..19.999_999_f64,
            on in any::<bool>(),
        ) {
            let relay = HysteresisRelay::default();
            let prev = if on { SwitchState::On } else { SwitchState::Off };
            prop_assert_eq!(relay.next_state(prev, t), prev);
        }

        #[test]
        fn below_band_always_heats(t in -100.0_f64..=15.0_f64, on in any::<bool>()) {
            let relay = HysteresisRelay::default();
            let prev = if on { SwitchState::On } else { SwitchState::Off };
            prop_assert_eq!(relay.next_state(prev, t), SwitchState::On);
        }
    }
}
