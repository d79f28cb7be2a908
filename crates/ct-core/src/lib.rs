//! Shared foundation for the cubetherm crates: unit aliases, temperature
//! scale conversion, physical constants and checked float helpers.

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CtError, CtResult};
pub use numeric::*;
pub use units::*;
