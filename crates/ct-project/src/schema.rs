//! Scenario schema definitions.

use ct_controls::SwitchState;
use ct_thermal::PlanetIrSource;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub environment: EnvironmentDef,
    #[serde(default = "NodeDef::internal")]
    pub internal: NodeDef,
    #[serde(default = "NodeDef::external")]
    pub external: NodeDef,
    #[serde(default)]
    pub coupling: CouplingDef,
    #[serde(default)]
    pub heater: HeaterDef,
    #[serde(default)]
    pub simulation: SimulationDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizing: Option<SizingDef>,
}

impl Scenario {
    /// The reference low-Earth-orbit case: battery inside a 1U-class shell,
    /// conductive coupling only, heater disabled, 30 000 s in 1000 samples.
    pub fn reference() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "Reference LEO".to_string(),
            environment: EnvironmentDef::default(),
            internal: NodeDef::internal(),
            external: NodeDef::external(),
            coupling: CouplingDef::default(),
            heater: HeaterDef::default(),
            simulation: SimulationDef::default(),
            sizing: Some(SizingDef::default()),
        }
    }
}

fn default_version() -> u32 {
    LATEST_VERSION
}

/// Orbit and optical surface parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentDef {
    pub orbital_period_s: f64,
    pub sunlit_fraction: f64,
    pub solar_constant_w_m2: f64,
    pub albedo: f64,
    pub absorptance: f64,
    pub emissivity_ext: f64,
    /// Emissivity of the facing internal surfaces, used by `coupling.facing_plates`.
    pub emissivity_int: f64,
    pub stefan_boltzmann: f64,
    pub planet_temp_k: f64,
    pub deep_space_temp_k: f64,
    pub solar_area_m2: f64,
    pub planet_area_m2: f64,
    pub radiating_area_m2: f64,
    pub view_factor_planet: f64,
    pub view_factor_albedo: f64,
    pub planet_ir: PlanetIrSource,
}

impl Default for EnvironmentDef {
    fn default() -> Self {
        Self {
            orbital_period_s: 5400.0,
            sunlit_fraction: 0.5,
            solar_constant_w_m2: 1366.0,
            albedo: 0.34,
            absorptance: 0.65,
            emissivity_ext: 0.9,
            emissivity_int: 0.1,
            stefan_boltzmann: 5.67e-8,
            planet_temp_k: 288.0,
            deep_space_temp_k: 0.0,
            solar_area_m2: 0.03231,
            planet_area_m2: 0.03231,
            radiating_area_m2: 0.06462,
            view_factor_planet: 0.3,
            view_factor_albedo: 0.3,
            planet_ir: PlanetIrSource::ShellTemperature,
        }
    }
}

/// A lumped node. Give either `capacitance_j_per_k` or `materials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacitance_j_per_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<MaterialDef>,
    #[serde(default)]
    pub initial_temp_c: f64,
}

impl NodeDef {
    /// Battery pack.
    pub fn internal() -> Self {
        Self {
            capacitance_j_per_k: Some(80.0),
            materials: Vec::new(),
            initial_temp_c: 0.0,
        }
    }

    /// Aluminium shell.
    pub fn external() -> Self {
        Self {
            capacitance_j_per_k: Some(570.0),
            materials: Vec::new(),
            initial_temp_c: 5.0,
        }
    }
}

/// One material of a node; the node capacitance is `Σ m·c`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    pub mass_kg: f64,
    pub specific_heat_j_per_kg_k: f64,
}

/// Battery-to-shell coupling.
///
/// `k_w_per_k` and `spacers` are alternative sources of K, as are
/// `r_w_per_k4` and `facing_plates` for R. A missing K or R is zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CouplingDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_w_per_k: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_w_per_k4: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacers: Option<SpacerDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing_plates: Option<FacingPlatesDef>,
}

impl Default for CouplingDef {
    fn default() -> Self {
        Self {
            k_w_per_k: Some(2.64e-3),
            r_w_per_k4: Some(0.0),
            spacers: None,
            facing_plates: None,
        }
    }
}

/// Identical conductive standoffs between battery and shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpacerDef {
    pub count: u32,
    pub conductivity_w_per_m_k: f64,
    /// Cross-section of one spacer
    pub area_m2: f64,
    pub length_m: f64,
    /// Contact conductance of the mounting joints, in series with the spacers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_conductance_w_per_k: Option<f64>,
}

/// Battery face and shell wall exchanging radiation as parallel plates,
/// both with `environment.emissivity_int`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacingPlatesDef {
    pub area_m2: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeaterDef {
    pub enabled: bool,
    pub power_w: f64,
    pub low_threshold_c: f64,
    pub high_threshold_c: f64,
    pub initial_state: SwitchState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_period_s: Option<f64>,
}

impl Default for HeaterDef {
    fn default() -> Self {
        Self {
            enabled: false,
            power_w: 1.0,
            low_threshold_c: 15.0,
            high_threshold_c: 20.0,
            initial_state: SwitchState::Off,
            sample_period_s: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorDef {
    #[default]
    Rk4,
    ForwardEuler,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationDef {
    pub duration_s: f64,
    /// Output samples including both ends
    pub samples: usize,
    pub max_dt_s: f64,
    pub integrator: IntegratorDef,
    pub max_steps: usize,
    pub min_dt_s: f64,
    pub max_retries: usize,
    pub cutback_factor: f64,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            duration_s: 30_000.0,
            samples: 1000,
            max_dt_s: 10.0,
            integrator: IntegratorDef::Rk4,
            max_steps: 1_000_000,
            min_dt_s: 1e-3,
            max_retries: 8,
            cutback_factor: 0.5,
        }
    }
}

/// Heater sizing request evaluated on a heater-off run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizingDef {
    pub target_temp_c: f64,
    /// Skip the initial transient before this time
    #[serde(default)]
    pub window_start_s: f64,
}

impl Default for SizingDef {
    fn default() -> Self {
        Self {
            target_temp_c: 18.0,
            window_start_s: 0.0,
        }
    }
}
