//! Run summary metrics.
//!
//! Condenses a finished run into the numbers a thermal review asks for:
//! temperature ranges, the last-orbit energy balance and heater usage.

use ct_sim::{
    CubeSatModel, HeaterSizing, NodeTemperatures, SimRecord, Window, duty_cycle,
    temperature_extrema, window_average_net_power,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Summary of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RunSummary {
    pub scenario: String,
    pub samples: usize,
    pub duration_s: f64,
    pub final_internal_c: f64,
    pub final_external_c: f64,
    pub internal_min_c: f64,
    pub internal_max_c: f64,
    pub external_min_c: f64,
    pub external_max_c: f64,
    /// Start of the window used for the energy balance (s)
    pub balance_window_start_s: f64,
    /// Mean net power into the internal node over that window (W)
    pub mean_net_internal_w: f64,
    /// Mean net power into the external node over that window (W)
    pub mean_net_external_w: f64,
    /// Solar plus albedo power absorbed by the shell, averaged over an orbit (W)
    pub orbit_average_absorbed_w: f64,
    /// Fraction of the run the heater was on; `None` without a heater
    pub heater_duty_cycle: Option<f64>,
    pub heater_switch_ons: usize,
    /// Heater sizing from an unheated run, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingSummary>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SizingSummary {
    pub target_c: f64,
    pub peak_w: f64,
    pub mean_w: f64,
    pub peak_time_s: f64,
}

impl From<HeaterSizing> for SizingSummary {
    fn from(s: HeaterSizing) -> Self {
        Self {
            target_c: s.target_c,
            peak_w: s.peak_w,
            mean_w: s.mean_w,
            peak_time_s: s.peak_time_s,
        }
    }
}

/// Summarize a run. The energy balance uses the last full orbit, or the
/// whole run when it is shorter than one orbit.
pub fn summarize(
    scenario: &str,
    model: &CubeSatModel,
    record: &SimRecord<NodeTemperatures>,
) -> AppResult<RunSummary> {
    let (t0, t_end) = match (record.t.first(), record.t.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => return Ok(RunSummary::default()),
    };
    let duration_s = t_end - t0;
    let period = model.environment().orbital_period_s;
    let balance_start = if duration_s >= period {
        t_end - period
    } else {
        t0
    };

    let extrema = temperature_extrema(record, Window::all())?;
    let (final_internal_c, final_external_c) = record
        .last()
        .map_or((0.0, 0.0), |(_, x)| (x.internal_c, x.external_c));

    let (mean_net_internal_w, mean_net_external_w) = if record.len() >= 2 {
        let net = window_average_net_power(model, record, Window::new(balance_start, t_end))?;
        (net.internal_w, net.external_w)
    } else {
        (0.0, 0.0)
    };

    let heater_duty_cycle = match model.heater_relay() {
        Some(_) if duration_s > 0.0 => {
            Some(duty_cycle(model.switch_log(), Window::new(t0, t_end))?)
        }
        _ => None,
    };

    Ok(RunSummary {
        scenario: scenario.to_string(),
        samples: record.len(),
        duration_s,
        final_internal_c,
        final_external_c,
        internal_min_c: extrema.internal_min_c,
        internal_max_c: extrema.internal_max_c,
        external_min_c: extrema.external_min_c,
        external_max_c: extrema.external_max_c,
        balance_window_start_s: balance_start,
        mean_net_internal_w,
        mean_net_external_w,
        orbit_average_absorbed_w: model.environment().orbit_average_absorbed_w(),
        heater_duty_cycle,
        heater_switch_ons: model.switch_log().switch_on_count(),
        sizing: None,
    })
}
