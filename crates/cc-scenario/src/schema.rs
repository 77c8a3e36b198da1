//! Scenario schema definitions.

use cc_ensemble::PerturbationSpec;
use cc_model::{ParameterOverrides, SimulationParams, Year};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub years: YearRangeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensemble: Option<EnsembleDef>,
    #[serde(default, skip_serializing_if = "ParameterOverrides::is_empty")]
    pub parameters: ParameterOverrides,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            years: YearRangeDef::default(),
            ensemble: None,
            parameters: ParameterOverrides::default(),
        }
    }

    /// Scenario overrides applied onto the built-in defaults.
    pub fn resolved_params(&self) -> SimulationParams {
        self.parameters.resolve()
    }
}

/// Inclusive year range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct YearRangeDef {
    pub start: Year,
    pub end: Year,
}

impl Default for YearRangeDef {
    fn default() -> Self {
        Self {
            start: 2020,
            end: 2100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnsembleDef {
    pub runs: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub perturbation: PerturbationSpec,
}
