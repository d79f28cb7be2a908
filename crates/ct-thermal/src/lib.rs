//! ct-thermal: lumped thermal elements of a two-node CubeSat model.
//!
//! Provides:
//! - Thermal nodes with a fixed capacitance
//! - The orbital environment: eclipse schedule, solar and albedo input,
//!   planetary infrared and radiation to deep space
//! - Conductive + radiative coupling between the internal and external node
//! - Closed-form derivation of coupling coefficients and capacitances
//!
//! Everything here is a pure function of its parameters and the current
//! temperatures, so it is safe to evaluate any number of times per step.
//!
//! # Example
//!
//! ```
//! use ct_thermal::{NodeCoupling, OrbitEnvironment};
//!
//! let env = OrbitEnvironment::default();
//! let sun = env.illumination(0.0);
//! assert!(sun.solar_w > 0.0);
//!
//! let coupling = NodeCoupling::new(2.64e-3, 0.0).unwrap();
//! let p = coupling.power_w(0.0, 5.0).unwrap();
//! assert!(p > 0.0);
//! ```

pub mod coefficients;
pub mod coupling;
pub mod environment;
pub mod error;
pub mod node;

// Re-exports
pub use coupling::NodeCoupling;
pub use environment::{Illumination, OrbitEnvironment, PlanetIrSource};
pub use error::{ThermalError, ThermalResult};
pub use node::ThermalNode;
