//! Scenario validation.

use crate::schema::{LATEST_VERSION, Scenario};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported scenario version {found} (latest is {latest})")]
    UnsupportedVersion { found: u32, latest: u32 },

    #[error("Scenario name must not be empty")]
    EmptyName,

    #[error("Year range start {start} is after end {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("Ensemble must have at least one run; omit the ensemble section for a single run")]
    EmptyEnsemble,

    #[error("Perturbation std-dev for {what} must be finite and non-negative, got {value}")]
    InvalidStdDev { what: &'static str, value: f64 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version != LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            found: scenario.version,
            latest: LATEST_VERSION,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if scenario.years.start > scenario.years.end {
        return Err(ValidationError::InvalidYearRange {
            start: scenario.years.start,
            end: scenario.years.end,
        });
    }

    if let Some(ensemble) = &scenario.ensemble {
        if ensemble.runs == 0 {
            return Err(ValidationError::EmptyEnsemble);
        }
        for (what, value) in [
            ("r", ensemble.perturbation.r_std_dev),
            ("lambda_ecs", ensemble.perturbation.lambda_ecs_std_dev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidStdDev { what, value });
            }
        }
    }

    Ok(())
}
