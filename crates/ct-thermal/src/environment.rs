//! Orbital thermal environment.
//!
//! The satellite spends the first `sunlit_fraction` of every orbit in
//! sunlight and the rest in eclipse. While sunlit the shell absorbs direct
//! solar flux and planetary albedo. It always exchanges infrared with the
//! planet and radiates to deep space as functions of the current shell
//! temperature.

use ct_core::units::constants::{
    EARTH_ALBEDO, EARTH_IR_TEMP_K, LEO_PERIOD_S, SOLAR_CONSTANT_W_M2,
};
use ct_core::{ensure_in_range, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};

use crate::error::{ThermalResult, check_finite};

/// Which temperature drives the planetary infrared term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetIrSource {
    /// `A_p·F_sp·ε·σ·T_shell⁴`, evaluated at the simulated shell temperature.
    #[default]
    ShellTemperature,
    /// `A_p·F_sp·ε·σ·T_p⁴`, using the fixed planet temperature.
    PlanetTemperature,
}

/// Heat absorbed from sunlight at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Illumination {
    /// Direct solar flux absorbed by the shell (W)
    pub solar_w: f64,
    /// Planetary albedo absorbed by the shell (W)
    pub albedo_w: f64,
}

impl Illumination {
    pub fn total_w(&self) -> f64 {
        self.solar_w + self.albedo_w
    }
}

/// Fixed parameters of the orbit and the shell's optical surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitEnvironment {
    /// Orbital period (s)
    pub orbital_period_s: f64,
    /// Fraction of each orbit spent in sunlight, in (0, 1]
    pub sunlit_fraction: f64,
    /// Solar irradiance J_s (W/m²)
    pub solar_constant_w_m2: f64,
    /// Planetary albedo a
    pub albedo: f64,
    /// Solar absorptance of the shell α_s
    pub absorptance: f64,
    /// Infrared emissivity of the shell ε
    pub emissivity: f64,
    /// Stefan-Boltzmann constant σ (W/m²/K⁴)
    pub stefan_boltzmann: f64,
    /// Planet blackbody temperature T_p (K)
    pub planet_temp_k: f64,
    /// Deep-space sink temperature (K)
    pub deep_space_temp_k: f64,
    /// Area facing the sun A_s (m²)
    pub solar_area_m2: f64,
    /// Area facing the planet A_p (m²)
    pub planet_area_m2: f64,
    /// Area radiating to deep space A_r (m²)
    pub radiating_area_m2: f64,
    /// View factor from shell to planet for infrared F_sp
    pub view_factor_planet: f64,
    /// View factor for absorbed albedo F_a
    pub view_factor_albedo: f64,
    /// Temperature used for planetary infrared
    pub planet_ir: PlanetIrSource,
}

impl Default for OrbitEnvironment {
    fn default() -> Self {
        Self {
            orbital_period_s: LEO_PERIOD_S,
            sunlit_fraction: 0.5,
            solar_constant_w_m2: SOLAR_CONSTANT_W_M2,
            albedo: EARTH_ALBEDO,
            absorptance: 0.65,
            emissivity: 0.9,
            stefan_boltzmann: 5.67e-8,
            planet_temp_k: EARTH_IR_TEMP_K,
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

impl OrbitEnvironment {
    /// Check every parameter, returning the first offending one.
    pub fn validate(&self) -> ThermalResult<()> {
        ensure_positive(self.orbital_period_s, "orbital_period_s")?;
        ensure_positive(self.sunlit_fraction, "sunlit_fraction")?;
        ensure_in_range(self.sunlit_fraction, 0.0, 1.0, "sunlit_fraction")?;
        ensure_non_negative(self.solar_constant_w_m2, "solar_constant_w_m2")?;
        ensure_in_range(self.albedo, 0.0, 1.0, "albedo")?;
        ensure_in_range(self.absorptance, 0.0, 1.0, "absorptance")?;
        ensure_in_range(self.emissivity, 0.0, 1.0, "emissivity")?;
        ensure_positive(self.stefan_boltzmann, "stefan_boltzmann")?;
        ensure_non_negative(self.planet_temp_k, "planet_temp_k")?;
        ensure_non_negative(self.deep_space_temp_k, "deep_space_temp_k")?;
        ensure_non_negative(self.solar_area_m2, "solar_area_m2")?;
        ensure_non_negative(self.planet_area_m2, "planet_area_m2")?;
        ensure_non_negative(self.radiating_area_m2, "radiating_area_m2")?;
        ensure_in_range(self.view_factor_planet, 0.0, 1.0, "view_factor_planet")?;
        ensure_in_range(self.view_factor_albedo, 0.0, 1.0, "view_factor_albedo")?;
        Ok(())
    }

    /// Validate and return `self`.
    pub fn validated(self) -> ThermalResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Position within the current orbit, in [0, 1).
    pub fn orbit_phase(&self, t: f64) -> f64 {
        t.rem_euclid(self.orbital_period_s) / self.orbital_period_s
    }

    pub fn is_illuminated(&self, t: f64) -> bool {
        self.orbit_phase(t) < self.sunlit_fraction
    }

    pub fn eclipse_fraction(&self) -> f64 {
        1.0 - self.sunlit_fraction
    }

    /// Direct solar input while sunlit: `A_s·α_s·J_s` (W).
    pub fn solar_input_w(&self) -> f64 {
        self.solar_area_m2 * self.absorptance * self.solar_constant_w_m2
    }

    /// Albedo input while sunlit: `A_p·F_a·α_s·J_s·a` (W).
    pub fn albedo_input_w(&self) -> f64 {
        self.planet_area_m2
            * self.view_factor_albedo
            * self.absorptance
            * self.solar_constant_w_m2
            * self.albedo
    }

    /// Absorbed sunlight at mission time `t`; zero during eclipse.
    pub fn illumination(&self, t: f64) -> Illumination {
        if self.is_illuminated(t) {
            Illumination {
                solar_w: self.solar_input_w(),
                albedo_w: self.albedo_input_w(),
            }
        } else {
            Illumination::default()
        }
    }

    /// Planetary infrared absorbed by the shell (W).
    pub fn planet_ir_w(&self, shell_temp_k: f64) -> ThermalResult<f64> {
        let t_k = match self.planet_ir {
            PlanetIrSource::ShellTemperature => shell_temp_k,
            PlanetIrSource::PlanetTemperature => self.planet_temp_k,
        };
        let q = self.planet_area_m2
            * self.view_factor_planet
            * self.emissivity
            * self.stefan_boltzmann
            * t_k.powi(4);
        check_finite(q, "planet infrared", &[shell_temp_k])
    }

    /// Net radiation from the shell to deep space: `A_r·ε·σ·(T⁴ − T_ds⁴)` (W).
    pub fn space_loss_w(&self, shell_temp_k: f64) -> ThermalResult<f64> {
        let q = self.radiating_area_m2
            * self.emissivity
            * self.stefan_boltzmann
            * (shell_temp_k.powi(4) - self.deep_space_temp_k.powi(4));
        check_finite(q, "deep-space radiation", &[shell_temp_k])
    }

    /// Sunlight absorbed per orbit, averaged over the orbit (W).
    pub fn orbit_average_absorbed_w(&self) -> f64 {
        self.sunlit_fraction * (self.solar_input_w() + self.albedo_input_w())
    }
}
