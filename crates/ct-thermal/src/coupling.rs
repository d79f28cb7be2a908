//! Conductive and radiative coupling between two nodes.

use ct_core::celsius_to_kelvin;
use serde::{Deserialize, Serialize};

use crate::error::{ThermalResult, check_finite};

/// Heat path between the internal and external node.
///
/// `P = K·(T_ext − T_int) + R·(T_ext⁴ − T_int⁴)`, with the quartic term in
/// kelvin. Positive power flows from the external node into the internal one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeCoupling {
    /// Conductive coefficient K (W/K)
    pub k_w_per_k: f64,
    /// Radiative coefficient R (W/K⁴)
    pub r_w_per_k4: f64,
}

impl NodeCoupling {
    /// Create a coupling. Both coefficients must be finite and non-negative.
    pub fn new(k_w_per_k: f64, r_w_per_k4: f64) -> ThermalResult<Self> {
        let k_w_per_k = ct_core::ensure_non_negative(k_w_per_k, "k_w_per_k")?;
        let r_w_per_k4 = ct_core::ensure_non_negative(r_w_per_k4, "r_w_per_k4")?;
        Ok(Self {
            k_w_per_k,
            r_w_per_k4,
        })
    }

    /// Conducted part of the exchange (W).
    pub fn conductive_w(&self, t_int_c: f64, t_ext_c: f64) -> f64 {
        self.k_w_per_k * (t_ext_c - t_int_c)
    }

    /// Radiated part of the exchange (W).
    pub fn radiative_w(&self, t_int_c: f64, t_ext_c: f64) -> f64 {
        let t_int_k = celsius_to_kelvin(t_int_c);
        let t_ext_k = celsius_to_kelvin(t_ext_c);
        self.r_w_per_k4 * (t_ext_k.powi(4) - t_int_k.powi(4))
    }

    /// Power exchanged from the external to the internal node (W).
    pub fn power_w(&self, t_int_c: f64, t_ext_c: f64) -> ThermalResult<f64> {
        let p = self.conductive_w(t_int_c, t_ext_c) + self.radiative_w(t_int_c, t_ext_c);
        check_finite(p, "node exchange power", &[t_int_c, t_ext_c])
    }
}
