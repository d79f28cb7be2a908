//! Scenario compilation: schema definitions into a runnable model.

use ct_controls::{HeaterRelay, HysteresisRelay, SampleConfig};
use ct_core::units::{j_per_kg_k, kg, m, m2, w_per_m_k};
use ct_project::schema::{CouplingDef, EnvironmentDef, IntegratorDef, NodeDef, Scenario};
use ct_sim::{CubeSatModel, IntegratorType, NodeTemperatures, SimOptions, TimeGrid};
use ct_thermal::coefficients::{
    MaterialMass, Spacers, capacitance_j_per_k, parallel_plate_radiative_coupling,
    series_conductance,
};
use ct_thermal::{NodeCoupling, OrbitEnvironment, ThermalError, ThermalNode};

use crate::error::{AppError, AppResult};

/// Everything needed to run one scenario.
#[derive(Debug, Clone)]
pub struct CompiledScenario {
    pub name: String,
    pub model: CubeSatModel,
    pub grid: TimeGrid,
    pub options: SimOptions,
}

fn compile_err(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Compile(format!("{context}: {err}"))
}

pub fn orbit_environment(env: &EnvironmentDef) -> AppResult<OrbitEnvironment> {
    OrbitEnvironment {
        orbital_period_s: env.orbital_period_s,
        sunlit_fraction: env.sunlit_fraction,
        solar_constant_w_m2: env.solar_constant_w_m2,
        albedo: env.albedo,
        absorptance: env.absorptance,
        emissivity: env.emissivity_ext,
        stefan_boltzmann: env.stefan_boltzmann,
        planet_temp_k: env.planet_temp_k,
        deep_space_temp_k: env.deep_space_temp_k,
        solar_area_m2: env.solar_area_m2,
        planet_area_m2: env.planet_area_m2,
        radiating_area_m2: env.radiating_area_m2,
        view_factor_planet: env.view_factor_planet,
        view_factor_albedo: env.view_factor_albedo,
        planet_ir: env.planet_ir,
    }
    .validated()
    .map_err(|e| compile_err("environment", e))
}

/// K and R from explicit values or from the spacer and facing-plate
/// descriptions. A coefficient with neither is zero.
pub fn node_coupling(coupling: &CouplingDef, env: &EnvironmentDef) -> AppResult<NodeCoupling> {
    let derive = |e: ThermalError| compile_err("coupling", e);
    let k = match (&coupling.k_w_per_k, &coupling.spacers) {
        (Some(k), _) => *k,
        (None, Some(spacers)) => {
            let g = Spacers {
                count: spacers.count,
                conductivity: w_per_m_k(spacers.conductivity_w_per_m_k),
                area: m2(spacers.area_m2),
                length: m(spacers.length_m),
            }
            .conductance_w_per_k()
            .map_err(derive)?;
            match spacers.joint_conductance_w_per_k {
                Some(joint) => series_conductance(&[g, joint]).map_err(derive)?,
                None => g,
            }
        }
        (None, None) => 0.0,
    };
    let r = match (&coupling.r_w_per_k4, &coupling.facing_plates) {
        (Some(r), _) => *r,
        (None, Some(plates)) => parallel_plate_radiative_coupling(
            m2(plates.area_m2),
            env.emissivity_int,
            env.emissivity_int,
            env.stefan_boltzmann,
        )
        .map_err(derive)?,
        (None, None) => 0.0,
    };
    NodeCoupling::new(k, r).map_err(derive)
}

/// A node from its explicit capacitance or from its material list.
pub fn thermal_node(which: &str, node: &NodeDef) -> AppResult<ThermalNode> {
    let context = format!("{which} node");
    let capacitance = match node.capacitance_j_per_k {
        Some(c) => c,
        None => {
            let materials: Vec<MaterialMass> = node
                .materials
                .iter()
                .map(|mat| {
                    MaterialMass::new(
                        mat.name.clone(),
                        kg(mat.mass_kg),
                        j_per_kg_k(mat.specific_heat_j_per_kg_k),
                    )
                })
                .collect();
            capacitance_j_per_k(&materials).map_err(|e| compile_err(&context, e))?
        }
    };
    ThermalNode::new(which, capacitance).map_err(|e| compile_err(&context, e))
}

/// Compile a validated scenario.
pub fn compile_scenario(scenario: &Scenario) -> AppResult<CompiledScenario> {
    ct_project::validate_scenario(scenario)?;

    let environment = orbit_environment(&scenario.environment)?;
    let coupling = node_coupling(&scenario.coupling, &scenario.environment)?;
    let internal = thermal_node("internal", &scenario.internal)?;
    let external = thermal_node("external", &scenario.external)?;
    let initial = NodeTemperatures::new(
        scenario.internal.initial_temp_c,
        scenario.external.initial_temp_c,
    );

    let mut model = CubeSatModel::new(environment, coupling, internal, external, initial)?;

    let heater = &scenario.heater;
    if heater.enabled {
        let band = HysteresisRelay::new(heater.low_threshold_c, heater.high_threshold_c)
            .map_err(|e| compile_err("heater", e))?;
        let relay =
            HeaterRelay::new(band, heater.power_w).map_err(|e| compile_err("heater", e))?;
        model = model.with_heater(relay, heater.initial_state);
        if let Some(period) = heater.sample_period_s {
            let sample = SampleConfig::new(period).map_err(|e| compile_err("heater", e))?;
            model = model.with_heater_sample_period(sample);
        }
    }

    let sim = &scenario.simulation;
    let grid = TimeGrid::linspace(0.0, sim.duration_s, sim.samples)?;
    let options = SimOptions {
        max_dt: sim.max_dt_s,
        max_steps: sim.max_steps,
        integrator: match sim.integrator {
            IntegratorDef::Rk4 => IntegratorType::RK4,
            IntegratorDef::ForwardEuler => IntegratorType::ForwardEuler,
        },
        min_dt: sim.min_dt_s,
        max_retries: sim.max_retries,
        cutback_factor: sim.cutback_factor,
        ..SimOptions::default()
    };

    Ok(CompiledScenario {
        name: scenario.name.clone(),
        model,
        grid,
        options,
    })
}

/// Compile with the heater removed, as needed for heater sizing.
pub fn compile_unheated(scenario: &Scenario) -> AppResult<CompiledScenario> {
    let mut unheated = scenario.clone();
    unheated.heater.enabled = false;
    compile_scenario(&unheated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_controls::SwitchState;

    #[test]
    fn reference_compiles_without_heater() {
        let compiled = compile_scenario(&Scenario::reference()).unwrap();
        assert!(compiled.model.heater_relay().is_none());
        assert_eq!(compiled.grid.len(), 1000);
        assert_eq!(compiled.grid.end(), 30_000.0);
        assert_eq!(compiled.options.max_dt, 10.0);
        assert_eq!(compiled.model.internal_node().capacitance_j_per_k(), 80.0);
    }

    #[test]
    fn heater_settings_reach_the_model() {
        let mut scenario = Scenario::reference();
        scenario.heater.enabled = true;
        scenario.heater.power_w = 2.0;
        scenario.heater.initial_state = SwitchState::On;
        let compiled = compile_scenario(&scenario).unwrap();

        let relay = compiled.model.heater_relay().unwrap();
        assert_eq!(relay.power_w, 2.0);
        assert_eq!(relay.relay, HysteresisRelay::default());
        assert_eq!(compiled.model.heater_state().switch, SwitchState::On);

        let unheated = compile_unheated(&scenario).unwrap();
        assert!(unheated.model.heater_relay().is_none());
    }

    #[test]
    fn hardware_description_sets_coefficients() {
        use ct_project::schema::{FacingPlatesDef, MaterialDef, SpacerDef};

        let mut scenario = Scenario::reference();
        scenario.internal.capacitance_j_per_k = None;
        scenario.internal.materials = vec![
            MaterialDef {
                name: "cells".to_string(),
                mass_kg: 0.06,
                specific_heat_j_per_kg_k: 900.0,
            },
            MaterialDef {
                name: "pcb".to_string(),
                mass_kg: 0.02,
                specific_heat_j_per_kg_k: 1100.0,
            },
        ];
        scenario.coupling = CouplingDef {
            k_w_per_k: None,
            r_w_per_k4: None,
            spacers: Some(SpacerDef {
                count: 4,
                conductivity_w_per_m_k: 0.3,
                area_m2: 2.2e-5,
                length_m: 0.01,
                joint_conductance_w_per_k: Some(0.05),
            }),
            facing_plates: Some(FacingPlatesDef { area_m2: 0.01 }),
        };
        scenario.environment.emissivity_int = 0.1;

        let compiled = compile_scenario(&scenario).unwrap();
        let c = compiled.model.internal_node().capacitance_j_per_k();
        assert!((c - 76.0).abs() < 1e-9);

        let coupling = compiled.model.coupling();
        let spacers = 4.0 * 0.3 * 2.2e-5 / 0.01;
        let k = 1.0 / (1.0 / spacers + 1.0 / 0.05);
        assert!((coupling.k_w_per_k - k).abs() < 1e-15);
        let r = 5.67e-8 * 0.01 / (1.0 / 0.1 + 1.0 / 0.1 - 1.0);
        assert!((coupling.r_w_per_k4 - r).abs() < 1e-22);

        // Emissivity of the facing surfaces now matters.
        scenario.environment.emissivity_int = 0.8;
        let brighter = compile_scenario(&scenario).unwrap();
        assert!(brighter.model.coupling().r_w_per_k4 > r);
    }

    #[test]
    fn missing_coefficients_are_zero() {
        let mut scenario = Scenario::reference();
        scenario.coupling = CouplingDef {
            k_w_per_k: Some(1e-3),
            r_w_per_k4: None,
            spacers: None,
            facing_plates: None,
        };
        let compiled = compile_scenario(&scenario).unwrap();
        assert_eq!(compiled.model.coupling().k_w_per_k, 1e-3);
        assert_eq!(compiled.model.coupling().r_w_per_k4, 0.0);
    }

    #[test]
    fn invalid_scenario_is_rejected_before_compiling() {
        let mut scenario = Scenario::reference();
        scenario.coupling.k_w_per_k = Some(-1.0);
        let err = compile_scenario(&scenario).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("coupling.k_w_per_k")));
    }
}
