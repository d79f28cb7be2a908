//! Scenario execution: compile, run, post-process.

use ct_project::schema::Scenario;
use ct_sim::{
    CubeSatModel, HeatBalance, HeaterSizing, NodeTemperatures, SimProgress, SimRecord, Window,
    heat_balance_series, minimum_heater_power, run_sim, run_sim_with_progress,
};
use tracing::info;

use crate::compile::{compile_scenario, compile_unheated};
use crate::error::{AppError, AppResult};
use crate::summary::{RunSummary, summarize};

/// Result of running one scenario.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Model after the run, holding its switch log
    pub model: CubeSatModel,
    pub record: SimRecord<NodeTemperatures>,
    /// Heat terms at every output sample
    pub balance: Vec<(f64, HeatBalance)>,
    pub summary: RunSummary,
}

/// Run a scenario to completion.
pub fn run_scenario(scenario: &Scenario) -> AppResult<RunOutput> {
    run_scenario_with_progress(scenario, None)
}

/// Run a scenario, reporting progress at every output time.
///
/// When the scenario has a `sizing` section a second, unheated run is made
/// and its heater sizing is attached to the summary.
pub fn run_scenario_with_progress(
    scenario: &Scenario,
    progress: Option<&mut dyn FnMut(SimProgress)>,
) -> AppResult<RunOutput> {
    let compiled = compile_scenario(scenario)?;
    let mut model = compiled.model;

    info!(
        scenario = %compiled.name,
        samples = compiled.grid.len(),
        duration_s = compiled.grid.duration(),
        heater = model.heater_relay().is_some(),
        "running scenario"
    );

    let record = run_sim_with_progress(&mut model, &compiled.grid, &compiled.options, progress)?;
    let balance = heat_balance_series(&model, &record)?;
    let mut summary = summarize(&compiled.name, &model, &record)?;

    if let Some(sizing) = &scenario.sizing {
        let sized = size_heater(
            scenario,
            &[sizing.target_temp_c],
            Window::starting_at(sizing.window_start_s),
        )?;
        summary.sizing = sized.into_iter().next().map(Into::into);
    }

    info!(
        scenario = %compiled.name,
        final_internal_c = summary.final_internal_c,
        final_external_c = summary.final_external_c,
        switch_ons = summary.heater_switch_ons,
        "scenario complete"
    );

    Ok(RunOutput {
        model,
        record,
        balance,
        summary,
    })
}

/// Minimum heater power for each target hold temperature.
///
/// Runs the scenario once with the heater removed, then evaluates every
/// target against that shell trajectory.
pub fn size_heater(
    scenario: &Scenario,
    targets_c: &[f64],
    window: Window,
) -> AppResult<Vec<HeaterSizing>> {
    if targets_c.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one target temperature is required".to_string(),
        ));
    }
    let compiled = compile_unheated(scenario)?;
    let mut model = compiled.model;
    let record = run_sim(&mut model, &compiled.grid, &compiled.options)?;

    let mut results = Vec::with_capacity(targets_c.len());
    for &target in targets_c {
        let sizing = minimum_heater_power(&model, &record, target, window)?;
        info!(
            target_c = target,
            peak_w = sizing.peak_w,
            mean_w = sizing.mean_w,
            "heater sizing"
        );
        results.push(sizing);
    }
    Ok(results)
}
