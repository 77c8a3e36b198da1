//! Ensemble errors.

use cc_model::ModelError;
use thiserror::Error;

/// Result type for ensemble operations.
pub type EnsembleResult<T> = Result<T, EnsembleError>;

/// Errors that abort an ensemble before or during execution.
///
/// There is no per-run isolation: the first failure aborts the whole ensemble.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnsembleError {
    /// Ensemble size below one.
    #[error("Ensemble needs at least one run, got {runs}")]
    InvalidRunCount { runs: usize },

    /// Run indices are stored as `u32`.
    #[error("Ensemble of {runs} runs exceeds the supported maximum")]
    TooManyRuns { runs: usize },

    /// Perturbation distribution could not be built.
    #[error("Invalid perturbation distribution for {what}: {message}")]
    InvalidDistribution { what: &'static str, message: String },

    /// Year range or other model input rejected.
    #[error("Model input error: {0}")]
    Model(#[from] ModelError),
}
