//! Progress events emitted while a run request is served.

use std::fmt;

/// Stages of [`execute_run_with_progress`](crate::execute_run_with_progress),
/// in the order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunStage {
    Validating,
    CheckingCache,
    LoadingCachedResult,
    DrawingParameters,
    Simulating,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            RunStage::Validating => "validating",
            RunStage::CheckingCache => "checking cache",
            RunStage::LoadingCachedResult => "loading cached result",
            RunStage::DrawingParameters => "drawing parameters",
            RunStage::Simulating => "simulating",
            RunStage::SavingResults => "saving results",
            RunStage::Completed => "completed",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    /// Wall-clock seconds since the request started.
    pub elapsed_s: f64,
    pub ensemble_runs: Option<usize>,
    pub detail: Option<String>,
}
