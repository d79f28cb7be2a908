use thiserror::Error;

pub type CtResult<T> = Result<T, CtError>;

/// A scalar failed one of the checks in [`crate::numeric`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CtError {
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} = {value} is out of range ({reason})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        reason: &'static str,
    },
}
