use ct_controls::SwitchState;
use ct_project::schema::*;
use ct_project::{load, load_json, load_yaml, save_json, save_yaml, validate_scenario};

#[test]
fn roundtrip_yaml_reference_scenario() {
    let scenario = Scenario::reference();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("ct_project_roundtrip_reference.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_heated_scenario() {
    let mut scenario = Scenario::reference();
    scenario.name = "Heated".to_string();
    scenario.heater = HeaterDef {
        enabled: true,
        power_w: 2.5,
        initial_state: SwitchState::On,
        sample_period_s: Some(30.0),
        ..HeaterDef::default()
    };
    scenario.simulation.integrator = IntegratorDef::ForwardEuler;
    scenario.sizing = None;

    let path = std::env::temp_dir().join("ct_project_roundtrip_heated.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(scenario, loaded);

    // Extension picks the format.
    assert_eq!(load(&path).unwrap(), scenario);
}

#[test]
fn minimal_yaml_fills_defaults() {
    let scenario: Scenario = serde_yaml::from_str("name: Minimal\n").unwrap();
    assert_eq!(scenario.version, LATEST_VERSION);
    assert_eq!(scenario.environment, EnvironmentDef::default());
    assert_eq!(scenario.internal, NodeDef::internal());
    assert_eq!(scenario.external, NodeDef::external());
    assert_eq!(scenario.simulation.samples, 1000);
    assert!(!scenario.heater.enabled);
    assert!(scenario.sizing.is_none());
    validate_scenario(&scenario).unwrap();
}

#[test]
fn enums_use_snake_case_names() {
    let yaml = "\
name: Names
environment:
  planet_ir: planet_temperature
heater:
  initial_state: on
simulation:
  integrator: forward_euler
";
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        scenario.environment.planet_ir,
        ct_thermal::PlanetIrSource::PlanetTemperature
    );
    assert_eq!(scenario.heater.initial_state, SwitchState::On);
    assert_eq!(scenario.simulation.integrator, IntegratorDef::ForwardEuler);
}

#[test]
fn roundtrip_yaml_derived_coefficients() {
    let mut scenario = Scenario::reference();
    scenario.internal = NodeDef {
        capacitance_j_per_k: None,
        materials: vec![MaterialDef {
            name: "cells".to_string(),
            mass_kg: 0.08,
            specific_heat_j_per_kg_k: 1000.0,
        }],
        initial_temp_c: 0.0,
    };
    scenario.coupling = CouplingDef {
        k_w_per_k: None,
        r_w_per_k4: None,
        spacers: Some(SpacerDef {
            count: 4,
            conductivity_w_per_m_k: 0.3,
            area_m2: 2.2e-5,
            length_m: 0.01,
            joint_conductance_w_per_k: None,
        }),
        facing_plates: Some(FacingPlatesDef { area_m2: 0.01 }),
    };

    let path = std::env::temp_dir().join("ct_project_roundtrip_derived.yaml");
    save_yaml(&path, &scenario).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("k_w_per_k"));
    assert_eq!(load_yaml(&path).unwrap(), scenario);
}
