//! Shared application service layer for cubetherm.
//!
//! Loads and validates scenarios, compiles them into a runnable model,
//! executes runs and condenses the results for the CLI.

pub mod compile;
pub mod error;
pub mod export;
pub mod project_service;
pub mod run_service;
pub mod summary;

// Re-export key types for convenience
pub use compile::{CompiledScenario, compile_scenario, compile_unheated};
pub use error::{AppError, AppResult};
pub use export::{TRAJECTORY_HEADER, switch_log_csv, trajectory_csv};
pub use project_service::{
    ScenarioFormat, load_scenario, render_scenario, save_scenario, scenario_template,
    validate_scenario,
};
pub use run_service::{RunOutput, run_scenario, run_scenario_with_progress, size_heater};
pub use summary::{RunSummary, SizingSummary, summarize};
