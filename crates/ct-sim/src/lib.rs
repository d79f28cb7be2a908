//! Transient simulation of the two-node CubeSat thermal model.
//!
//! Provides:
//! - `TransientModel` trait with a once-per-step control hook
//! - Fixed-step RK4 and forward Euler integrators
//! - Grid-landing driver with step cutback, a step limit and progress reports
//! - `CubeSatModel`, the battery/shell derivative with a thermostatic heater
//! - Post-processing: exchange power, heat balance, heater sizing, duty cycle

pub mod analysis;
pub mod cubesat;
pub mod error;
pub mod events;
pub mod grid;
pub mod integrator;
pub mod model;
pub mod sim;

// Re-exports for public API
pub use analysis::{
    HeaterSizing, NetPower, TemperatureExtrema, Window, duty_cycle, exchange_power_series,
    heat_balance_series, minimum_heater_power, temperature_extrema, window_average_net_power,
};
pub use cubesat::{CubeSatModel, HeatBalance, NodeTemperatures};
pub use error::{SimError, SimResult};
pub use events::{SwitchEvent, SwitchLog};
pub use grid::TimeGrid;
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use sim::{IntegratorType, SimOptions, SimProgress, SimRecord, run_sim, run_sim_with_progress};
