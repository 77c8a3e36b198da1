//! Content-based hashing for run IDs.

use crate::types::RunType;
use cc_model::{SimulationParams, YearSequence};
use sha2::{Digest, Sha256};

/// Identical inputs hash to the same id; the scenario name is not part of it.
///
/// Floats are hashed by bit pattern in a fixed field order, so NaN, `inf`
/// and `-inf` inputs each get their own id.
pub fn compute_run_id(
    years: &YearSequence,
    parameters: &SimulationParams,
    run_type: &RunType,
    model_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(years.start().to_le_bytes());
    hasher.update(years.end().to_le_bytes());

    for value in [
        parameters.c0,
        parameters.r,
        parameters.seasonal_amp,
        parameters.lambda_ecs,
        parameters.beta,
        parameters.ocean_depth_m,
        parameters.ice_coeff_cm_per_c,
    ] {
        hasher.update(value.to_bits().to_le_bytes());
    }

    match run_type {
        RunType::Single => hasher.update([0u8]),
        RunType::Ensemble {
            runs,
            seed,
            perturbation,
        } => {
            hasher.update([1u8]);
            hasher.update((*runs as u64).to_le_bytes());
            hasher.update(seed.to_le_bytes());
            hasher.update(perturbation.r_std_dev.to_bits().to_le_bytes());
            hasher.update(perturbation.lambda_ecs_std_dev.to_bits().to_le_bytes());
        }
    }

    hasher.update((model_version.len() as u64).to_le_bytes());
    hasher.update(model_version.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_ensemble::PerturbationSpec;

    fn years() -> YearSequence {
        YearSequence::range(2020, 2100).unwrap()
    }

    fn ensemble(seed: u64) -> RunType {
        RunType::Ensemble {
            runs: 10,
            seed,
            perturbation: PerturbationSpec::default(),
        }
    }

    #[test]
    fn hash_stability() {
        let params = SimulationParams::default();
        let hash1 = compute_run_id(&years(), &params, &RunType::Single, "v1");
        let hash2 = compute_run_id(&years(), &params, &RunType::Single, "v1");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let params = SimulationParams::default();
        let base = compute_run_id(&years(), &params, &ensemble(1), "v1");

        let other_seed = compute_run_id(&years(), &params, &ensemble(2), "v1");
        assert_ne!(base, other_seed);

        let other_params = SimulationParams {
            c0: 400.0,
            ..params
        };
        assert_ne!(
            base,
            compute_run_id(&years(), &other_params, &ensemble(1), "v1")
        );

        let other_years = YearSequence::range(2020, 2050).unwrap();
        assert_ne!(
            base,
            compute_run_id(&other_years, &params, &ensemble(1), "v1")
        );

        assert_ne!(base, compute_run_id(&years(), &params, &ensemble(1), "v2"));
    }

    #[test]
    fn non_finite_parameters_get_distinct_ids() {
        let with_c0 = |c0| SimulationParams {
            c0,
            ..SimulationParams::default()
        };
        let nan = compute_run_id(&years(), &with_c0(f64::NAN), &RunType::Single, "v1");
        let inf = compute_run_id(&years(), &with_c0(f64::INFINITY), &RunType::Single, "v1");
        let neg_inf = compute_run_id(&years(), &with_c0(f64::NEG_INFINITY), &RunType::Single, "v1");
        assert_ne!(nan, inf);
        assert_ne!(inf, neg_inf);
        assert_ne!(nan, neg_inf);
    }

    #[test]
    fn single_and_ensemble_never_collide() {
        let params = SimulationParams::default();
        assert_ne!(
            compute_run_id(&years(), &params, &RunType::Single, "v1"),
            compute_run_id(&years(), &params, &ensemble(0), "v1")
        );
    }
}
