//! CSV export of run results.

use crate::run_service::RunOutput;

pub const TRAJECTORY_HEADER: &str =
    "time_s,internal_c,external_c,solar_w,albedo_w,planet_ir_w,space_loss_w,exchange_w,heater_w";

/// One row per output sample: node temperatures plus every heat term.
pub fn trajectory_csv(output: &RunOutput) -> String {
    let mut csv = String::with_capacity(96 * (output.record.len() + 1));
    csv.push_str(TRAJECTORY_HEADER);
    csv.push('\n');
    for ((t, x), (_, b)) in output.record.iter().zip(&output.balance) {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            t,
            x.internal_c,
            x.external_c,
            b.solar_w,
            b.albedo_w,
            b.planet_ir_w,
            b.space_loss_w,
            b.exchange_w,
            b.heater_w
        ));
    }
    csv
}

/// `time_s,state` rows for every heater transition.
pub fn switch_log_csv(output: &RunOutput) -> String {
    let log = output.model.switch_log();
    let mut csv = String::from("time_s,state\n");
    for event in &log.events {
        let state = if event.state.is_on() { "on" } else { "off" };
        csv.push_str(&format!("{},{}\n", event.time_s, state));
    }
    csv
}
