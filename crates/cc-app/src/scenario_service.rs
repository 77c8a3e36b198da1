//! Scenario loading, saving, validation, and request building.

use std::path::Path;

use cc_model::{ParameterOverrides, Year};
use cc_scenario::Scenario;

use crate::error::{AppError, AppResult};
use crate::run_service::{RunMode, RunOptions, RunRequest};

/// Load a scenario from a YAML or JSON file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    Ok(cc_scenario::load(path)?)
}

/// Save a scenario as YAML.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    Ok(cc_scenario::save_yaml(path, scenario)?)
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    cc_scenario::validate_scenario(scenario).map_err(|e| AppError::Validation(e.to_string()))
}

/// Values given on the command line; each `Some` beats the scenario file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub years: Option<(Year, Year)>,
    /// Ensemble size; `Some(0)` forces a single run.
    pub runs: Option<usize>,
    pub seed: Option<u64>,
    pub parameters: ParameterOverrides,
}

/// Combine a scenario (or built-in defaults) with overrides into a run request.
pub fn build_request(
    scenario: Option<&Scenario>,
    overrides: &RunOverrides,
    options: RunOptions,
) -> AppResult<RunRequest> {
    let default_scenario;
    let scenario = match scenario {
        Some(s) => s,
        None => {
            default_scenario = Scenario::new("default");
            &default_scenario
        }
    };

    let (year_start, year_end) = overrides
        .years
        .unwrap_or((scenario.years.start, scenario.years.end));
    if year_start > year_end {
        return Err(AppError::InvalidInput(format!(
            "Start year {} is after end year {}",
            year_start, year_end
        )));
    }

    let file_ensemble = scenario.ensemble.as_ref();
    let runs = overrides
        .runs
        .or_else(|| file_ensemble.map(|e| e.runs))
        .unwrap_or(0);
    let mode = if runs == 0 {
        RunMode::Single
    } else {
        RunMode::Ensemble {
            runs,
            seed: overrides.seed.or_else(|| file_ensemble.and_then(|e| e.seed)),
            perturbation: file_ensemble.map(|e| e.perturbation).unwrap_or_default(),
        }
    };

    let parameters = scenario
        .parameters
        .merged_with(&overrides.parameters)
        .resolve();

    Ok(RunRequest {
        scenario_name: scenario.name.clone(),
        year_start,
        year_end,
        parameters,
        mode,
        options,
    })
}
