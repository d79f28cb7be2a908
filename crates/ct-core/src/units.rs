//! Unit types and temperature-scale helpers.
//!
//! The solver works in plain `f64` SI values; the uom aliases are used where
//! a parameter is derived from physical dimensions (material masses, spacer
//! geometry).

use uom::si::f64 as si;

pub type Area = si::Area;
pub type HeatCapacity = si::HeatCapacity;
pub type Length = si::Length;
pub type Mass = si::Mass;
pub type SpecificHeat = si::SpecificHeatCapacity;
pub type ThermalConductivity = si::ThermalConductivity;

#[inline]
pub fn m(v: f64) -> Length {
    Length::new::<uom::si::length::meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    Area::new::<uom::si::area::square_meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    Mass::new::<uom::si::mass::kilogram>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> SpecificHeat {
    SpecificHeat::new::<uom::si::specific_heat_capacity::joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn w_per_m_k(v: f64) -> ThermalConductivity {
    ThermalConductivity::new::<uom::si::thermal_conductivity::watt_per_meter_kelvin>(v)
}

#[inline]
pub fn j_per_k(v: f64) -> HeatCapacity {
    HeatCapacity::new::<uom::si::heat_capacity::joule_per_kelvin>(v)
}

/// Celsius reading to absolute temperature in kelvin.
#[inline]
pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    t_c + constants::ZERO_CELSIUS_K
}

/// Absolute temperature in kelvin to a Celsius reading.
#[inline]
pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    t_k - constants::ZERO_CELSIUS_K
}

pub mod constants {
    /// 0 °C expressed in kelvin.
    pub const ZERO_CELSIUS_K: f64 = 273.15;

    /// Mean solar irradiance at 1 AU (W/m²).
    pub const SOLAR_CONSTANT_W_M2: f64 = 1366.0;

    /// Mean Earth Bond albedo.
    pub const EARTH_ALBEDO: f64 = 0.34;

    /// Effective Earth blackbody temperature (K).
    pub const EARTH_IR_TEMP_K: f64 = 288.0;

    /// Period of a typical low Earth orbit (s).
    pub const LEO_PERIOD_S: f64 = 90.0 * 60.0;
}
