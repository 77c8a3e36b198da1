//! Shared application service layer for climate-calculus.
//!
//! This crate gives front-ends one interface for loading scenarios, resolving
//! run requests, executing single runs or ensembles, caching results and
//! exporting tables.

pub mod error;
pub mod progress;
pub mod run_service;
pub mod scenario_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use run_service::{
    RunMode, RunOptions, RunRequest, RunResponse, execute_run, execute_run_with_progress,
    export_csv, list_runs,
};
pub use scenario_service::{
    RunOverrides, build_request, load_scenario, save_scenario, validate_scenario,
};
