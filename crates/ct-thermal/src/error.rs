//! Error types for thermal element calculations.

use ct_core::error::CtError;
use thiserror::Error;

/// Errors that can occur while building or evaluating thermal elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermalError {
    #[error("Invalid parameter: {what} = {value} ({reason})")]
    InvalidParameter {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Non-finite result for {what} (inputs: {inputs:?})")]
    NonFinite { what: &'static str, inputs: Vec<f64> },
}

pub type ThermalResult<T> = Result<T, ThermalError>;

impl From<CtError> for ThermalError {
    fn from(e: CtError) -> Self {
        match e {
            CtError::NonFinite { what, value } => ThermalError::InvalidParameter {
                what,
                value,
                reason: "must be finite",
            },
            CtError::OutOfRange {
                what,
                value,
                reason,
            } => ThermalError::InvalidParameter {
                what,
                value,
                reason,
            },
        }
    }
}

/// Ensure a computed quantity is finite, reporting the inputs that produced it.
pub(crate) fn check_finite(value: f64, what: &'static str, inputs: &[f64]) -> ThermalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ThermalError::NonFinite {
            what,
            inputs: inputs.to_vec(),
        })
    }
}
