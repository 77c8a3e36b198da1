//! Error types for the cc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives front-ends one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ensemble error: {0}")]
    Ensemble(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cc-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<cc_model::ModelError> for AppError {
    fn from(err: cc_model::ModelError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<cc_ensemble::EnsembleError> for AppError {
    fn from(err: cc_ensemble::EnsembleError) -> Self {
        match err {
            cc_ensemble::EnsembleError::Model(model) => model.into(),
            other => AppError::Ensemble(other.to_string()),
        }
    }
}

impl From<cc_scenario::ScenarioError> for AppError {
    fn from(err: cc_scenario::ScenarioError) -> Self {
        match err {
            cc_scenario::ScenarioError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<cc_results::ResultsError> for AppError {
    fn from(err: cc_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
