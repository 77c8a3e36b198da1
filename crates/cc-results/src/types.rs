//! Result metadata types.

use crate::hash::compute_run_id;
use cc_ensemble::PerturbationSpec;
use cc_model::{SimulationParams, Year, YearSequence};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Everything needed to reproduce and identify a stored table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub run_type: RunType,
    pub year_start: Year,
    pub year_end: Year,
    pub parameters: SimulationParams,
    pub rows: usize,
    pub model_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RunType {
    Single,
    Ensemble {
        runs: usize,
        seed: u64,
        perturbation: PerturbationSpec,
    },
}

impl RunType {
    /// Rows a table of this type holds over `years` years.
    pub fn expected_rows(&self, years: usize) -> usize {
        match self {
            Self::Single => years,
            Self::Ensemble { runs, .. } => runs * years,
        }
    }
}

/// Version stamped into manifests and mixed into run ids.
pub const MODEL_VERSION: &str = env!("CARGO_PKG_VERSION");

impl RunManifest {
    /// Manifest for a freshly computed table, stamped with the current UTC time.
    pub fn new(
        scenario_name: impl Into<String>,
        years: &YearSequence,
        parameters: SimulationParams,
        run_type: RunType,
        rows: usize,
    ) -> Self {
        let run_id = compute_run_id(years, &parameters, &run_type, MODEL_VERSION);
        Self {
            run_id,
            scenario_name: scenario_name.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            run_type,
            year_start: years.start(),
            year_end: years.end(),
            parameters,
            rows,
            model_version: MODEL_VERSION.to_string(),
        }
    }

    /// Whether every float survives a JSON round trip; JSON has no NaN or infinity.
    pub fn is_persistable(&self) -> bool {
        let p = &self.parameters;
        let spread = match &self.run_type {
            RunType::Single => vec![],
            RunType::Ensemble { perturbation, .. } => {
                vec![perturbation.r_std_dev, perturbation.lambda_ecs_std_dev]
            }
        };
        [
            p.c0,
            p.r,
            p.seasonal_amp,
            p.lambda_ecs,
            p.beta,
            p.ocean_depth_m,
            p.ice_coeff_cm_per_c,
        ]
        .into_iter()
        .chain(spread)
        .all(f64::is_finite)
    }

    pub fn years(&self) -> Option<YearSequence> {
        YearSequence::range(self.year_start, self.year_end).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_rows() {
        assert_eq!(RunType::Single.expected_rows(81), 81);
        let ensemble = RunType::Ensemble {
            runs: 200,
            seed: 1,
            perturbation: PerturbationSpec::default(),
        };
        assert_eq!(ensemble.expected_rows(5), 1000);
    }

    #[test]
    fn manifest_run_id_matches_hash() {
        let years = YearSequence::range(2020, 2024).unwrap();
        let params = SimulationParams::default();
        let manifest = RunManifest::new("baseline", &years, params, RunType::Single, 5);
        assert_eq!(
            manifest.run_id,
            compute_run_id(&years, &params, &RunType::Single, MODEL_VERSION)
        );
        assert_eq!(manifest.years(), Some(years));
        assert!(manifest.timestamp.ends_with('Z'));
    }

    #[test]
    fn run_type_is_tagged_in_json() {
        let json = serde_json::to_string(&RunType::Single).unwrap();
        assert_eq!(json, r#"{"type":"Single"}"#);
    }

    #[test]
    fn non_finite_parameters_are_not_persistable() {
        let years = YearSequence::range(2020, 2022).unwrap();
        let finite = RunManifest::new("a", &years, SimulationParams::default(), RunType::Single, 3);
        assert!(finite.is_persistable());

        let params = SimulationParams {
            c0: f64::NAN,
            ..SimulationParams::default()
        };
        let nan = RunManifest::new("a", &years, params, RunType::Single, 3);
        assert!(!nan.is_persistable());

        let wide = RunType::Ensemble {
            runs: 2,
            seed: 1,
            perturbation: PerturbationSpec {
                r_std_dev: f64::INFINITY,
                lambda_ecs_std_dev: 0.5,
            },
        };
        let wide = RunManifest::new("a", &years, SimulationParams::default(), wide, 6);
        assert!(!wide.is_persistable());
    }
}
