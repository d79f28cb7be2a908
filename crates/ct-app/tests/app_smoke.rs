//! Smoke test for the ct-app service layer.

use std::path::PathBuf;

use ct_app::{ScenarioFormat, load_scenario, save_scenario, scenario_template, validate_scenario};
use ct_project::schema::Scenario;

fn scenario_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("scenarios");
    path.push(name);
    path
}

#[test]
fn loads_bundled_scenarios() {
    for name in ["reference.yaml", "heated.yaml", "derived.yaml"] {
        let scenario = load_scenario(&scenario_path(name)).expect("scenario should load");
        validate_scenario(&scenario).expect("scenario should validate");
    }
}

#[test]
fn missing_file_names_the_path() {
    let path = scenario_path("does_not_exist.yaml");
    let err = load_scenario(&path).unwrap_err();
    assert!(err.to_string().contains("does_not_exist.yaml"));
}

#[test]
fn template_parses_back_to_reference() {
    let yaml = scenario_template(ScenarioFormat::Yaml).unwrap();
    let from_yaml: Scenario = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(from_yaml, Scenario::reference());

    let json = scenario_template(ScenarioFormat::Json).unwrap();
    let from_json: Scenario = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, Scenario::reference());
}

#[test]
fn save_rejects_invalid_scenario() {
    let mut scenario = Scenario::reference();
    scenario.heater.low_threshold_c = 25.0;
    let path = std::env::temp_dir().join("ct_app_invalid_scenario.yaml");
    let err = save_scenario(&path, &scenario).unwrap_err();
    assert!(err.to_string().contains("heater.low_threshold_c"));
}

#[test]
fn derived_scenario_compiles_from_hardware() {
    let scenario = load_scenario(&scenario_path("derived.yaml")).unwrap();
    let compiled = ct_app::compile_scenario(&scenario).unwrap();
    let c = compiled.model.internal_node().capacitance_j_per_k();
    assert!((c - 76.0).abs() < 1e-9);
    assert!(compiled.model.coupling().k_w_per_k > 0.0);
    assert!(compiled.model.coupling().r_w_per_k4 > 0.0);
}
