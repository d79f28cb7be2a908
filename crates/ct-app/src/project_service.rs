//! Scenario loading, saving, validation and templates.

use std::path::Path;

use ct_project::schema::Scenario;
use ct_project::{ProjectError, load_json, load_yaml};

use crate::error::{AppError, AppResult};

/// Serialization format for scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioFormat {
    #[default]
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// `.json` selects JSON; everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScenarioFormat::Json,
            _ => ScenarioFormat::Yaml,
        }
    }
}

/// Load and validate a scenario file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let loaded = match ScenarioFormat::from_path(path) {
        ScenarioFormat::Json => load_json(path),
        ScenarioFormat::Yaml => load_yaml(path),
    };
    loaded.map_err(|e| match e {
        ProjectError::Io(source) => AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => AppError::from(other),
    })
}

/// Validate and save a scenario in the format given by the extension.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    validate_scenario(scenario)?;
    let content = render_scenario(scenario, ScenarioFormat::from_path(path))?;
    std::fs::write(path, content).map_err(|e| AppError::ScenarioFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    ct_project::validate_scenario(scenario)?;
    Ok(())
}

/// Serialize a scenario to text.
pub fn render_scenario(scenario: &Scenario, format: ScenarioFormat) -> AppResult<String> {
    Ok(match format {
        ScenarioFormat::Yaml => serde_yaml::to_string(scenario)?,
        ScenarioFormat::Json => serde_json::to_string_pretty(scenario)?,
    })
}

/// The reference scenario, ready to be edited.
pub fn scenario_template(format: ScenarioFormat) -> AppResult<String> {
    render_scenario(&Scenario::reference(), format)
}
