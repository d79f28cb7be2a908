//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what} = {value}")]
    InvalidArg { what: &'static str, value: f64 },

    /// Hysteresis band is empty or inverted.
    #[error(
        "Invalid hysteresis band: low threshold {low_c} °C must be below high threshold {high_c} °C"
    )]
    InvertedThresholds { low_c: f64, high_c: f64 },
}

impl From<ct_core::CtError> for ControlError {
    fn from(e: ct_core::CtError) -> Self {
        match e {
            ct_core::CtError::NonFinite { what, value }
            | ct_core::CtError::OutOfRange { what, value, .. } => {
                ControlError::InvalidArg { what, value }
            }
        }
    }
}
