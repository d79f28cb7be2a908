//! Post-processing of recorded runs.
//!
//! All functions work on a finished [`SimRecord`] together with the model
//! that produced it, so the heater state seen at each sample comes from the
//! model's switch log rather than from its live controller.

use crate::cubesat::{CubeSatModel, HeatBalance, NodeTemperatures, numeric_domain};
use crate::error::{SimError, SimResult};
use crate::events::SwitchLog;
use crate::sim::SimRecord;

/// Closed time window `[start_s, end_s]` used to select samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub start_s: f64,
    pub end_s: f64,
}

impl Window {
    pub fn new(start_s: f64, end_s: f64) -> Self {
        Self { start_s, end_s }
    }

    /// The whole record.
    pub fn all() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Everything from `start_s` on.
    pub fn starting_at(start_s: f64) -> Self {
        Self::new(start_s, f64::INFINITY)
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_s && t <= self.end_s
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::all()
    }
}

/// Minimum heater power needed to hold the internal node at a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaterSizing {
    pub target_c: f64,
    /// Largest deficit over the window (W)
    pub peak_w: f64,
    /// Time-averaged deficit over the window (W)
    pub mean_w: f64,
    /// Sample time of the peak (s)
    pub peak_time_s: f64,
}

/// Time-averaged net heat flow into each node (W).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetPower {
    pub internal_w: f64,
    pub external_w: f64,
}

/// Temperature range of both nodes over a window (°C).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureExtrema {
    pub internal_min_c: f64,
    pub internal_max_c: f64,
    pub external_min_c: f64,
    pub external_max_c: f64,
}

impl TemperatureExtrema {
    pub fn internal_swing_c(&self) -> f64 {
        self.internal_max_c - self.internal_min_c
    }

    pub fn external_swing_c(&self) -> f64 {
        self.external_max_c - self.external_min_c
    }
}

fn windowed<'a>(
    record: &'a SimRecord<NodeTemperatures>,
    window: Window,
) -> impl Iterator<Item = (f64, &'a NodeTemperatures)> + 'a {
    record.iter().filter(move |(t, _)| window.contains(*t))
}

/// Trapezoidal time average of `(t, y)` samples. A single sample is its own mean.
fn trapezoid_mean(samples: &[(f64, f64)]) -> Option<f64> {
    match samples {
        [] => None,
        [(_, y)] => Some(*y),
        [first, .., last] => {
            let span = last.0 - first.0;
            let area: f64 = samples
                .windows(2)
                .map(|w| 0.5 * (w[0].1 + w[1].1) * (w[1].0 - w[0].0))
                .sum();
            Some(area / span)
        }
    }
}

/// Exchange power `P(t)` from external to internal node at every sample.
pub fn exchange_power_series(
    model: &CubeSatModel,
    record: &SimRecord<NodeTemperatures>,
) -> SimResult<Vec<(f64, f64)>> {
    record
        .iter()
        .map(|(t, x)| {
            model
                .coupling()
                .power_w(x.internal_c, x.external_c)
                .map(|p| (t, p))
                .map_err(|e| numeric_domain(e, t, x))
        })
        .collect()
}

/// Every heat term at every sample, with the heater state from the switch log.
pub fn heat_balance_series(
    model: &CubeSatModel,
    record: &SimRecord<NodeTemperatures>,
) -> SimResult<Vec<(f64, HeatBalance)>> {
    record
        .iter()
        .map(|(t, x)| model.logged_heat_balance(t, x).map(|b| (t, b)))
        .collect()
}

/// Heat the internal node would lose if held at `target_c` with no heater.
///
/// The deficit at each sample is `max(0, −P(target_c, T2(t)))`. Run the
/// model with the heater disabled for a meaningful shell trajectory.
pub fn minimum_heater_power(
    model: &CubeSatModel,
    record: &SimRecord<NodeTemperatures>,
    target_c: f64,
    window: Window,
) -> SimResult<HeaterSizing> {
    if !target_c.is_finite() {
        return Err(SimError::InvalidArg {
            what: "target temperature must be finite",
        });
    }

    let mut deficits = Vec::new();
    for (t, x) in windowed(record, window) {
        let p = model.coupling().power_w(target_c, x.external_c)?;
        deficits.push((t, (-p).max(0.0)));
    }

    let (peak_time_s, peak_w) = deficits
        .iter()
        .copied()
        .fold(None, |best: Option<(f64, f64)>, (t, d)| match best {
            Some((_, b)) if b >= d => best,
            _ => Some((t, d)),
        })
        .ok_or(SimError::InvalidArg {
            what: "sizing window contains no samples",
        })?;
    let mean_w = trapezoid_mean(&deficits).unwrap_or(peak_w);

    Ok(HeaterSizing {
        target_c,
        peak_w,
        mean_w,
        peak_time_s,
    })
}

/// Mean net power into each node over `window`.
///
/// Over whole orbits at periodic steady state both values approach zero.
pub fn window_average_net_power(
    model: &CubeSatModel,
    record: &SimRecord<NodeTemperatures>,
    window: Window,
) -> SimResult<NetPower> {
    let mut internal = Vec::new();
    let mut external = Vec::new();
    for (t, x) in windowed(record, window) {
        let balance = model.logged_heat_balance(t, x)?;
        internal.push((t, balance.net_internal_w()));
        external.push((t, balance.net_external_w()));
    }
    if internal.len() < 2 {
        return Err(SimError::InvalidArg {
            what: "averaging window needs at least two samples",
        });
    }
    Ok(NetPower {
        internal_w: trapezoid_mean(&internal).unwrap_or(0.0),
        external_w: trapezoid_mean(&external).unwrap_or(0.0),
    })
}

/// Fraction of `window` the heater spent on, in [0, 1].
///
/// Infinite window bounds are clipped to `[log.start_time_s, end_s]`.
pub fn duty_cycle(log: &SwitchLog, window: Window) -> SimResult<f64> {
    let start = window.start_s.max(log.start_time_s);
    let end = window.end_s;
    if !(end.is_finite() && end > start) {
        return Err(SimError::InvalidArg {
            what: "duty cycle window must be finite and non-empty",
        });
    }
    Ok((log.on_time(start, end) / (end - start)).clamp(0.0, 1.0))
}

/// Minimum and maximum of both node temperatures over `window`.
pub fn temperature_extrema(
    record: &SimRecord<NodeTemperatures>,
    window: Window,
) -> SimResult<TemperatureExtrema> {
    windowed(record, window)
        .fold(None, |acc: Option<TemperatureExtrema>, (_, x)| {
            Some(match acc {
                None => TemperatureExtrema {
                    internal_min_c: x.internal_c,
                    internal_max_c: x.internal_c,
                    external_min_c: x.external_c,
                    external_max_c: x.external_c,
                },
                Some(e) => TemperatureExtrema {
                    internal_min_c: e.internal_min_c.min(x.internal_c),
                    internal_max_c: e.internal_max_c.max(x.internal_c),
                    external_min_c: e.external_min_c.min(x.external_c),
                    external_max_c: e.external_max_c.max(x.external_c),
                },
            })
        })
        .ok_or(SimError::InvalidArg {
            what: "window contains no samples",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_controls::SwitchState;
    use ct_thermal::{NodeCoupling, OrbitEnvironment, ThermalNode};

    fn model(k: f64) -> CubeSatModel {
        CubeSatModel::new(
            OrbitEnvironment::default(),
            NodeCoupling::new(k, 0.0).unwrap(),
            ThermalNode::new("battery", 80.0).unwrap(),
            ThermalNode::new("shell", 570.0).unwrap(),
            NodeTemperatures::new(0.0, 5.0),
        )
        .unwrap()
    }

    fn record(points: &[(f64, f64, f64)]) -> SimRecord<NodeTemperatures> {
        SimRecord {
            t: points.iter().map(|p| p.0).collect(),
            x: points
                .iter()
                .map(|p| NodeTemperatures::new(p.1, p.2))
                .collect(),
        }
    }

    #[test]
    fn exchange_overflow_reports_time_and_state() {
        let model = CubeSatModel::new(
            OrbitEnvironment::default(),
            NodeCoupling::new(0.5, 1e-10).unwrap(),
            ThermalNode::new("battery", 80.0).unwrap(),
            ThermalNode::new("shell", 570.0).unwrap(),
            NodeTemperatures::new(0.0, 5.0),
        )
        .unwrap();
        let rec = record(&[(0.0, 0.0, 5.0), (30.0, 0.0, 1e100)]);
        let err = exchange_power_series(&model, &rec).unwrap_err();
        assert_eq!(
            err,
            SimError::NonFinite {
                what: "node exchange power",
                t: 30.0,
                state: vec![0.0, 1e100],
            }
        );
    }

    #[test]
    fn trapezoid_mean_of_ramp() {
        let mean = trapezoid_mean(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert!((mean - 1.0).abs() < 1e-12);
        assert_eq!(trapezoid_mean(&[(3.0, 4.0)]), Some(4.0));
        assert_eq!(trapezoid_mean(&[]), None);
    }

    #[test]
    fn sizing_uses_coldest_shell() {
        let model = model(0.5);
        let rec = record(&[(0.0, 0.0, 10.0), (10.0, 0.0, -10.0), (20.0, 0.0, 0.0)]);
        let sizing = minimum_heater_power(&model, &rec, 5.0, Window::all()).unwrap();
        // Deficit is 0.5·(5 − T2) where positive.
        assert!((sizing.peak_w - 7.5).abs() < 1e-12);
        assert_eq!(sizing.peak_time_s, 10.0);
        // Samples 0, 7.5, 2.5 W over two 10 s intervals.
        assert!((sizing.mean_w - (3.75 + 5.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn sizing_is_zero_when_shell_is_warmer() {
        let model = model(0.5);
        let rec = record(&[(0.0, 0.0, 30.0), (10.0, 0.0, 40.0)]);
        let sizing = minimum_heater_power(&model, &rec, 20.0, Window::all()).unwrap();
        assert_eq!(sizing.peak_w, 0.0);
        assert_eq!(sizing.mean_w, 0.0);
    }

    #[test]
    fn sizing_rejects_empty_window() {
        let model = model(0.5);
        let rec = record(&[(0.0, 0.0, 30.0), (10.0, 0.0, 40.0)]);
        assert!(minimum_heater_power(&model, &rec, 20.0, Window::starting_at(100.0)).is_err());
    }

    #[test]
    fn duty_cycle_over_window() {
        let mut log = SwitchLog::new(0.0, SwitchState::Off);
        log.push(25.0, SwitchState::On);
        log.push(75.0, SwitchState::Off);
        let d = duty_cycle(&log, Window::new(0.0, 100.0)).unwrap();
        assert!((d - 0.5).abs() < 1e-12);
        assert!(duty_cycle(&log, Window::all()).is_err());
    }

    #[test]
    fn extrema_over_window() {
        let rec = record(&[(0.0, 1.0, -5.0), (10.0, 3.0, 12.0), (20.0, 2.0, 4.0)]);
        let e = temperature_extrema(&rec, Window::starting_at(5.0)).unwrap();
        assert_eq!(e.internal_min_c, 2.0);
        assert_eq!(e.internal_max_c, 3.0);
        assert!((e.external_swing_c() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn exchange_series_follows_samples() {
        let model = model(0.5);
        let rec = record(&[(0.0, 0.0, 2.0), (10.0, 4.0, 2.0)]);
        let series = exchange_power_series(&model, &rec).unwrap();
        assert_eq!(series, vec![(0.0, 1.0), (10.0, -1.0)]);
    }
}
