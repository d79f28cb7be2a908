//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid time grid: {what} (at index {index})")]
    InvalidGrid { what: &'static str, index: usize },

    #[error("Thermal configuration error: {0}")]
    Thermal(#[from] ct_thermal::ThermalError),

    #[error("Control configuration error: {0}")]
    Control(#[from] ct_controls::ControlError),

    #[error("Non-finite {what} at t = {t} s (state: {state:?})")]
    NonFinite {
        what: &'static str,
        t: f64,
        state: Vec<f64>,
    },

    #[error("Retryable step failure: {message}")]
    Retryable { message: String },

    #[error("Step size underflow at t = {t_reached} s (dt = {dt} s, state: {state}): {reason}")]
    StepUnderflow {
        t_reached: f64,
        dt: f64,
        /// Last accepted state, `Debug`-formatted
        state: String,
        reason: String,
    },

    #[error("Step limit of {max_steps} reached at t = {t_reached} s")]
    StepLimit { max_steps: usize, t_reached: f64 },
}

impl SimError {
    /// True for failures that a smaller step may avoid.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SimError::Retryable { .. })
    }
}

pub type SimResult<T> = Result<T, SimError>;
