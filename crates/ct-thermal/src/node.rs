//! Lumped thermal node.

use ct_core::units::HeatCapacity;
use uom::si::heat_capacity::joule_per_kelvin;

use crate::error::ThermalResult;

/// A lumped mass with uniform temperature.
///
/// Temperatures are simulation state and live outside the node; the node only
/// carries what is fixed for a run.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermalNode {
    /// Name for diagnostics
    pub name: String,
    /// Thermal capacitance (J/K), always positive
    capacitance_j_per_k: f64,
}

impl ThermalNode {
    /// Create a node. Capacitance must be finite and positive.
    pub fn new(name: impl Into<String>, capacitance_j_per_k: f64) -> ThermalResult<Self> {
        let capacitance_j_per_k =
            ct_core::ensure_positive(capacitance_j_per_k, "capacitance_j_per_k")?;
        Ok(Self {
            name: name.into(),
            capacitance_j_per_k,
        })
    }

    /// Create a node from a uom heat capacity.
    pub fn with_capacity(name: impl Into<String>, capacity: HeatCapacity) -> ThermalResult<Self> {
        Self::new(name, capacity.get::<joule_per_kelvin>())
    }

    pub fn capacitance_j_per_k(&self) -> f64 {
        self.capacitance_j_per_k
    }

    /// Temperature rate (K/s) for a net heat input (W).
    pub fn temperature_rate(&self, net_power_w: f64) -> f64 {
        net_power_w / self.capacitance_j_per_k
    }
}
