//! Scenario validation logic.

use crate::schema::{
    CouplingDef, EnvironmentDef, HeaterDef, LATEST_VERSION, NodeDef, Scenario, SimulationDef,
    SizingDef, SpacerDef,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

type Check = Result<(), ValidationError>;

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, v: f64) -> Check {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn positive(field: &str, v: f64) -> Check {
    finite(field, v)?;
    if v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn non_negative(field: &str, v: f64) -> Check {
    finite(field, v)?;
    if v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be non-negative"))
    }
}

fn unit_interval(field: &str, v: f64) -> Check {
    finite(field, v)?;
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(invalid(field, v, "must lie in [0, 1]"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    validate_environment(&scenario.environment)?;
    validate_node("internal", &scenario.internal)?;
    validate_node("external", &scenario.external)?;
    validate_coupling(&scenario.coupling)?;
    validate_heater(&scenario.heater)?;
    validate_simulation(&scenario.simulation)?;
    if let Some(sizing) = &scenario.sizing {
        validate_sizing(sizing, &scenario.simulation)?;
    }
    Ok(())
}

fn validate_environment(env: &EnvironmentDef) -> Check {
    positive("environment.orbital_period_s", env.orbital_period_s)?;
    positive("environment.sunlit_fraction", env.sunlit_fraction)?;
    unit_interval("environment.sunlit_fraction", env.sunlit_fraction)?;
    non_negative("environment.solar_constant_w_m2", env.solar_constant_w_m2)?;
    unit_interval("environment.albedo", env.albedo)?;
    unit_interval("environment.absorptance", env.absorptance)?;
    unit_interval("environment.emissivity_ext", env.emissivity_ext)?;
    unit_interval("environment.emissivity_int", env.emissivity_int)?;
    positive("environment.stefan_boltzmann", env.stefan_boltzmann)?;
    non_negative("environment.planet_temp_k", env.planet_temp_k)?;
    non_negative("environment.deep_space_temp_k", env.deep_space_temp_k)?;
    non_negative("environment.solar_area_m2", env.solar_area_m2)?;
    non_negative("environment.planet_area_m2", env.planet_area_m2)?;
    non_negative("environment.radiating_area_m2", env.radiating_area_m2)?;
    unit_interval("environment.view_factor_planet", env.view_factor_planet)?;
    unit_interval("environment.view_factor_albedo", env.view_factor_albedo)?;
    Ok(())
}

fn validate_node(which: &str, node: &NodeDef) -> Check {
    let capacitance_field = format!("{which}.capacitance_j_per_k");
    match (node.capacitance_j_per_k, node.materials.is_empty()) {
        (Some(c), true) => positive(&capacitance_field, c)?,
        (Some(c), false) => {
            return Err(invalid(
                &capacitance_field,
                c,
                &format!("conflicts with {which}.materials"),
            ));
        }
        (None, true) => {
            return Err(invalid(
                &capacitance_field,
                "none",
                &format!("either this or {which}.materials is required"),
            ));
        }
        (None, false) => {
            let mut total = 0.0;
            for (i, material) in node.materials.iter().enumerate() {
                let prefix = format!("{which}.materials[{i}]");
                non_negative(&format!("{prefix}.mass_kg"), material.mass_kg)?;
                non_negative(
                    &format!("{prefix}.specific_heat_j_per_kg_k"),
                    material.specific_heat_j_per_kg_k,
                )?;
                total += material.mass_kg * material.specific_heat_j_per_kg_k;
            }
            if total <= 0.0 {
                return Err(invalid(
                    &format!("{which}.materials"),
                    total,
                    "must add up to a positive heat capacity",
                ));
            }
        }
    }
    let field = format!("{which}.initial_temp_c");
    finite(&field, node.initial_temp_c)?;
    if node.initial_temp_c < -273.15 {
        return Err(invalid(&field, node.initial_temp_c, "below absolute zero"));
    }
    Ok(())
}

fn validate_coupling(coupling: &CouplingDef) -> Check {
    if let Some(k) = coupling.k_w_per_k {
        non_negative("coupling.k_w_per_k", k)?;
        if coupling.spacers.is_some() {
            return Err(invalid(
                "coupling.k_w_per_k",
                k,
                "conflicts with coupling.spacers",
            ));
        }
    }
    if let Some(r) = coupling.r_w_per_k4 {
        non_negative("coupling.r_w_per_k4", r)?;
        if coupling.facing_plates.is_some() {
            return Err(invalid(
                "coupling.r_w_per_k4",
                r,
                "conflicts with coupling.facing_plates",
            ));
        }
    }
    if let Some(spacers) = &coupling.spacers {
        validate_spacers(spacers)?;
    }
    if let Some(plates) = &coupling.facing_plates {
        non_negative("coupling.facing_plates.area_m2", plates.area_m2)?;
    }
    Ok(())
}

fn validate_spacers(spacers: &SpacerDef) -> Check {
    non_negative(
        "coupling.spacers.conductivity_w_per_m_k",
        spacers.conductivity_w_per_m_k,
    )?;
    non_negative("coupling.spacers.area_m2", spacers.area_m2)?;
    positive("coupling.spacers.length_m", spacers.length_m)?;
    if let Some(g) = spacers.joint_conductance_w_per_k {
        positive("coupling.spacers.joint_conductance_w_per_k", g)?;
    }
    Ok(())
}

fn validate_heater(heater: &HeaterDef) -> Check {
    non_negative("heater.power_w", heater.power_w)?;
    finite("heater.low_threshold_c", heater.low_threshold_c)?;
    finite("heater.high_threshold_c", heater.high_threshold_c)?;
    if heater.low_threshold_c >= heater.high_threshold_c {
        return Err(invalid(
            "heater.low_threshold_c",
            heater.low_threshold_c,
            &format!(
                "must be below heater.high_threshold_c = {}",
                heater.high_threshold_c
            ),
        ));
    }
    if let Some(period) = heater.sample_period_s {
        positive("heater.sample_period_s", period)?;
    }
    Ok(())
}

fn validate_simulation(sim: &SimulationDef) -> Check {
    positive("simulation.duration_s", sim.duration_s)?;
    if sim.samples < 2 {
        return Err(invalid(
            "simulation.samples",
            sim.samples,
            "need at least two samples",
        ));
    }
    positive("simulation.max_dt_s", sim.max_dt_s)?;
    if sim.max_steps == 0 {
        return Err(invalid("simulation.max_steps", 0, "must be positive"));
    }
    positive("simulation.min_dt_s", sim.min_dt_s)?;
    if sim.min_dt_s > sim.max_dt_s {
        return Err(invalid(
            "simulation.min_dt_s",
            sim.min_dt_s,
            "must not exceed simulation.max_dt_s",
        ));
    }
    finite("simulation.cutback_factor", sim.cutback_factor)?;
    if !(sim.cutback_factor > 0.0 && sim.cutback_factor < 1.0) {
        return Err(invalid(
            "simulation.cutback_factor",
            sim.cutback_factor,
            "must lie in (0, 1)",
        ));
    }
    Ok(())
}

fn validate_sizing(sizing: &SizingDef, sim: &SimulationDef) -> Check {
    finite("sizing.target_temp_c", sizing.target_temp_c)?;
    non_negative("sizing.window_start_s", sizing.window_start_s)?;
    if sizing.window_start_s >= sim.duration_s {
        return Err(invalid(
            "sizing.window_start_s",
            sizing.window_start_s,
            "must be before the end of the run",
        ));
    }
    Ok(())
}
