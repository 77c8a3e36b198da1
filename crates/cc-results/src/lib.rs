//! cc-results: CSV export, run manifests and the run cache.

pub mod csv;
pub mod hash;
pub mod store;
pub mod types;

pub use csv::{format_value, parse_csv, to_csv_string, write_csv, write_csv_file};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Run {run_id} has non-finite parameters and cannot be stored")]
    NotPersistable { run_id: String },

    #[error("CSV error on line {line}: {message}")]
    Csv { line: usize, message: String },
}
