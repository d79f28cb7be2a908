//! End-to-end scenario runs through the service layer.

use ct_app::{
    TRAJECTORY_HEADER, run_scenario, run_scenario_with_progress, size_heater, switch_log_csv,
    trajectory_csv,
};
use ct_project::schema::Scenario;
use ct_sim::{SimProgress, Window};

fn short_reference() -> Scenario {
    let mut scenario = Scenario::reference();
    scenario.simulation.duration_s = 10_800.0;
    scenario.simulation.samples = 361;
    scenario
}

#[test]
fn reference_run_produces_summary_and_sizing() {
    let output = run_scenario(&short_reference()).unwrap();
    let summary = &output.summary;

    assert_eq!(summary.samples, 361);
    assert_eq!(summary.duration_s, 10_800.0);
    assert_eq!(summary.balance_window_start_s, 5400.0);
    assert!(summary.heater_duty_cycle.is_none());
    assert_eq!(summary.heater_switch_ons, 0);
    assert!(summary.external_max_c > summary.external_min_c);
    assert_eq!(
        summary.orbit_average_absorbed_w,
        output.model.environment().orbit_average_absorbed_w()
    );
    assert!(summary.orbit_average_absorbed_w > 0.0);

    let sizing = summary.sizing.expect("reference scenario requests sizing");
    assert_eq!(sizing.target_c, 18.0);
    assert!(sizing.peak_w > 0.0);
    assert!(sizing.mean_w <= sizing.peak_w);
}

#[test]
fn heated_run_reports_duty_cycle() {
    let mut scenario = short_reference();
    scenario.heater.enabled = true;
    let output = run_scenario(&scenario).unwrap();

    let duty = output.summary.heater_duty_cycle.expect("heater is enabled");
    assert!(duty > 0.0 && duty <= 1.0);
    assert!(output.summary.heater_switch_ons >= 1);
    assert!(output.summary.final_internal_c > 10.0);
}

#[test]
fn switch_log_csv_lists_every_transition() {
    let mut scenario = short_reference();
    scenario.heater.enabled = true;
    let output = run_scenario(&scenario).unwrap();

    let csv = switch_log_csv(&output);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("time_s,state"));
    // The battery starts cold, so the heater comes on at the first sample.
    assert_eq!(lines.next(), Some("0,on"));
    assert_eq!(csv.lines().count(), output.model.switch_log().events.len() + 1);
}

#[test]
fn csv_has_one_row_per_sample() {
    let output = run_scenario(&short_reference()).unwrap();
    let csv = trajectory_csv(&output);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some(TRAJECTORY_HEADER));
    assert_eq!(lines.count(), 361);
    assert!(csv.starts_with(&format!("{TRAJECTORY_HEADER}\n0,0,5,")));
}

#[test]
fn sizing_is_monotonic_in_target() {
    let sizes = size_heater(&short_reference(), &[5.0, 18.0, 30.0], Window::all()).unwrap();
    assert_eq!(sizes.len(), 3);
    assert!(sizes[0].peak_w <= sizes[1].peak_w);
    assert!(sizes[1].peak_w <= sizes[2].peak_w);
    assert!(size_heater(&short_reference(), &[], Window::all()).is_err());
}

#[test]
fn progress_reaches_the_end() {
    let mut last = None;
    let mut sink = |p: SimProgress| last = Some(p);
    run_scenario_with_progress(&short_reference(), Some(&mut sink)).unwrap();
    let last = last.expect("progress was reported");
    assert_eq!(last.time_s, 10_800.0);
    assert_eq!(last.fraction, 1.0);
}
