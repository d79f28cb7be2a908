use ct_project::schema::*;
use ct_project::{ValidationError, validate_scenario};

fn field_of(err: ValidationError) -> String {
    match err {
        ValidationError::InvalidValue { field, .. } => field,
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn rejects_non_positive_orbital_period() {
    let mut scenario = Scenario::reference();
    scenario.environment.orbital_period_s = 0.0;
    let err = validate_scenario(&scenario).unwrap_err();
    assert_eq!(field_of(err), "environment.orbital_period_s");
}

#[test]
fn rejects_non_finite_solar_constant() {
    let mut scenario = Scenario::reference();
    scenario.environment.solar_constant_w_m2 = f64::NAN;
    let err = validate_scenario(&scenario).unwrap_err();
    assert!(err.to_string().contains("environment.solar_constant_w_m2"));
    assert!(err.to_string().contains("NaN"));
}

#[test]
fn rejects_inverted_thresholds() {
    let mut scenario = Scenario::reference();
    scenario.heater.low_threshold_c = 20.0;
    scenario.heater.high_threshold_c = 15.0;
    let err = validate_scenario(&scenario).unwrap_err();
    assert!(err.to_string().contains("heater.low_threshold_c = 20"));
}

#[test]
fn rejects_negative_coupling() {
    let mut scenario = Scenario::reference();
    scenario.coupling.r_w_per_k4 = Some(-1e-10);
    assert_eq!(
        field_of(validate_scenario(&scenario).unwrap_err()),
        "coupling.r_w_per_k4"
    );
}

#[test]
fn rejects_zero_shell_capacitance() {
    let mut scenario = Scenario::reference();
    scenario.external.capacitance_j_per_k = Some(0.0);
    assert_eq!(
        field_of(validate_scenario(&scenario).unwrap_err()),
        "external.capacitance_j_per_k"
    );
}

#[test]
fn rejects_sunlit_fraction_above_one() {
    let mut scenario = Scenario::reference();
    scenario.environment.sunlit_fraction = 1.2;
    assert_eq!(
        field_of(validate_scenario(&scenario).unwrap_err()),
        "environment.sunlit_fraction"
    );
}

#[test]
fn rejects_sizing_window_past_end() {
    let mut scenario = Scenario::reference();
    scenario.sizing = Some(SizingDef {
        target_temp_c: 18.0,
        window_start_s: 40_000.0,
    });
    assert_eq!(
        field_of(validate_scenario(&scenario).unwrap_err()),
        "sizing.window_start_s"
    );
}

#[test]
fn rejects_single_sample() {
    let mut scenario = Scenario::reference();
    scenario.simulation.samples = 1;
    assert_eq!(
        field_of(validate_scenario(&scenario).unwrap_err()),
        "simulation.samples"
    );
}

#[test]
fn rejects_zero_sample_period() {
    let mut scenario = Scenario::reference();
    scenario.heater.sample_period_s = Some(0.0);
    assert_eq!(
        field_of(validate_scenario(&scenario).unwrap_err()),
        "heater.sample_period_s"
    );
}
