//! Heater control primitives for cubetherm.
//!
//! The only controllable heat injection point in the thermal model is a
//! thermostatic heater on the internal node. It is driven by a two-position
//! relay with hysteresis.
//!
//! # Architecture
//!
//! - Transition logic is a pure function `(previous state, temperature) -> next state`
//! - Controller state is a plain value owned by whoever runs the simulation
//! - Controllers operate in sampled mode: outputs are held between samples
//!
//! Nothing in this crate keeps global state, so independent simulation runs
//! never share a relay.

pub mod error;
pub mod relay;
pub mod sampled;

pub use error::{ControlError, ControlResult};
pub use relay::{HeaterRelay, HeaterState, HysteresisRelay, SwitchState};
pub use sampled::{SampleClock, SampleConfig};
