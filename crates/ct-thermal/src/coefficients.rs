//! Closed-form derivation of node coefficients.
//!
//! These turn a physical description (spacers, facing plates, material
//! masses) into the scalar K, R and C values the transient model consumes.

use ct_core::units::{Area, Length, Mass, SpecificHeat, ThermalConductivity};
use uom::si::area::square_meter;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
use uom::si::thermal_conductivity::watt_per_meter_kelvin;

use crate::error::{ThermalError, ThermalResult};

/// Identical conductive spacers mounted in parallel.
#[derive(Debug, Clone, Copy)]
pub struct Spacers {
    pub count: u32,
    pub conductivity: ThermalConductivity,
    /// Cross-section of one spacer
    pub area: Area,
    pub length: Length,
}

impl Spacers {
    /// Conductance of the spacer set: `n·k·A/L` (W/K).
    pub fn conductance_w_per_k(&self) -> ThermalResult<f64> {
        let k = ct_core::ensure_non_negative(
            self.conductivity.get::<watt_per_meter_kelvin>(),
            "spacer_conductivity",
        )?;
        let a = ct_core::ensure_non_negative(self.area.get::<square_meter>(), "spacer_area")?;
        let l = ct_core::ensure_positive(self.length.get::<meter>(), "spacer_length")?;
        Ok(f64::from(self.count) * k * a / l)
    }
}

/// Conductances in series (W/K). An empty chain or any zero link conducts nothing.
pub fn series_conductance(links_w_per_k: &[f64]) -> ThermalResult<f64> {
    let mut resistance = 0.0;
    for &g in links_w_per_k {
        let g = ct_core::ensure_non_negative(g, "series_link_w_per_k")?;
        if g == 0.0 {
            return Ok(0.0);
        }
        resistance += 1.0 / g;
    }
    if resistance == 0.0 {
        return Ok(0.0);
    }
    Ok(1.0 / resistance)
}

/// Radiative coefficient between two large parallel plates (W/K⁴).
///
/// `R = σ·A / (1/ε_a + 1/ε_b − 1)`.
pub fn parallel_plate_radiative_coupling(
    area: Area,
    emissivity_a: f64,
    emissivity_b: f64,
    stefan_boltzmann: f64,
) -> ThermalResult<f64> {
    let a = ct_core::ensure_non_negative(area.get::<square_meter>(), "plate_area")?;
    let ea = ct_core::ensure_in_range(emissivity_a, 0.0, 1.0, "emissivity_a")?;
    let eb = ct_core::ensure_in_range(emissivity_b, 0.0, 1.0, "emissivity_b")?;
    let sigma = ct_core::ensure_positive(stefan_boltzmann, "stefan_boltzmann")?;
    if ea == 0.0 || eb == 0.0 {
        return Ok(0.0);
    }
    Ok(sigma * a / (1.0 / ea + 1.0 / eb - 1.0))
}

/// One material contributing to a node's heat capacity.
#[derive(Debug, Clone)]
pub struct MaterialMass {
    pub name: String,
    pub mass: Mass,
    pub specific_heat: SpecificHeat,
}

impl MaterialMass {
    pub fn new(name: impl Into<String>, mass: Mass, specific_heat: SpecificHeat) -> Self {
        Self {
            name: name.into(),
            mass,
            specific_heat,
        }
    }
}

/// Node capacitance `Σ m·c` (J/K). Errors if the total is not positive.
pub fn capacitance_j_per_k(materials: &[MaterialMass]) -> ThermalResult<f64> {
    let mut total = 0.0;
    for material in materials {
        let m = ct_core::ensure_non_negative(material.mass.get::<kilogram>(), "material_mass")?;
        let c = ct_core::ensure_non_negative(
            material.specific_heat.get::<joule_per_kilogram_kelvin>(),
            "material_specific_heat",
        )?;
        total += m * c;
    }
    if total > 0.0 {
        Ok(total)
    } else {
        Err(ThermalError::InvalidParameter {
            what: "capacitance_j_per_k",
            value: total,
            reason: "materials must add up to a positive heat capacity",
        })
    }
}
