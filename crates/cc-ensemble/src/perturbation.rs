//! Gaussian perturbation of the sensitivity parameters.

use crate::{EnsembleError, EnsembleResult};
use cc_model::SimulationParams;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Standard deviations applied around the base parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerturbationSpec {
    /// Std-dev of the CO2 growth rate `r`.
    pub r_std_dev: f64,
    /// Std-dev of the climate sensitivity `lambda_ecs`, °C.
    pub lambda_ecs_std_dev: f64,
}

impl PerturbationSpec {
    pub const DEFAULT_R_STD_DEV: f64 = 0.001;
    pub const DEFAULT_LAMBDA_ECS_STD_DEV: f64 = 0.5;
}

impl Default for PerturbationSpec {
    fn default() -> Self {
        Self {
            r_std_dev: Self::DEFAULT_R_STD_DEV,
            lambda_ecs_std_dev: Self::DEFAULT_LAMBDA_ECS_STD_DEV,
        }
    }
}

/// Perturbed values for one ensemble member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityDraw {
    pub r: f64,
    pub lambda_ecs: f64,
}

impl SensitivityDraw {
    /// `base` with `r` and `lambda_ecs` replaced; everything else held fixed.
    pub fn apply(&self, base: &SimulationParams) -> SimulationParams {
        base.with_sensitivity(self.r, self.lambda_ecs)
    }
}

/// Draw `runs` sensitivity pairs centred on `base`.
///
/// All `r` samples are drawn before any `lambda_ecs` sample, so draw `i` is
/// the i-th sample of each distribution.
pub fn draw_sensitivities<R: Rng + ?Sized>(
    rng: &mut R,
    runs: usize,
    base: &SimulationParams,
    spec: &PerturbationSpec,
) -> EnsembleResult<Vec<SensitivityDraw>> {
    let r_dist = normal("r", base.r, spec.r_std_dev)?;
    let lambda_dist = normal("lambda_ecs", base.lambda_ecs, spec.lambda_ecs_std_dev)?;

    let r_values: Vec<f64> = (0..runs).map(|_| r_dist.sample(&mut *rng)).collect();
    let lambda_values: Vec<f64> = (0..runs).map(|_| lambda_dist.sample(&mut *rng)).collect();

    Ok(r_values
        .into_iter()
        .zip(lambda_values)
        .map(|(r, lambda_ecs)| SensitivityDraw { r, lambda_ecs })
        .collect())
}

fn normal(what: &'static str, mean: f64, std_dev: f64) -> EnsembleResult<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| EnsembleError::InvalidDistribution {
        what,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_core::{mean, std_dev};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn draws_are_centred_on_base_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let base = SimulationParams::default();
        let draws = draw_sensitivities(&mut rng, 4000, &base, &PerturbationSpec::default()).unwrap();
        assert_eq!(draws.len(), 4000);

        let r: Vec<f64> = draws.iter().map(|d| d.r).collect();
        let lambda: Vec<f64> = draws.iter().map(|d| d.lambda_ecs).collect();

        assert!((mean(&r) - 0.0055).abs() < 1e-4);
        assert!((std_dev(&r) - 0.001).abs() < 1e-4);
        assert!((mean(&lambda) - 3.0).abs() < 0.05);
        assert!((std_dev(&lambda) - 0.5).abs() < 0.05);
    }

    #[test]
    fn draws_follow_custom_centres() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let base = SimulationParams {
            r: 0.02,
            lambda_ecs: 4.5,
            ..Default::default()
        };
        let draws = draw_sensitivities(&mut rng, 2000, &base, &PerturbationSpec::default()).unwrap();
        let r: Vec<f64> = draws.iter().map(|d| d.r).collect();
        let lambda: Vec<f64> = draws.iter().map(|d| d.lambda_ecs).collect();
        assert!((mean(&r) - 0.02).abs() < 2e-4);
        assert!((mean(&lambda) - 4.5).abs() < 0.1);
    }

    #[test]
    fn zero_std_dev_reproduces_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let spec = PerturbationSpec {
            r_std_dev: 0.0,
            lambda_ecs_std_dev: 0.0,
        };
        let base = SimulationParams::default();
        let draws = draw_sensitivities(&mut rng, 3, &base, &spec).unwrap();
        for d in draws {
            assert_eq!(d.r, base.r);
            assert_eq!(d.lambda_ecs, base.lambda_ecs);
        }
    }

    #[test]
    fn negative_std_dev_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let spec = PerturbationSpec {
            r_std_dev: -1.0,
            ..Default::default()
        };
        let err = draw_sensitivities(&mut rng, 3, &SimulationParams::default(), &spec).unwrap_err();
        assert!(matches!(err, EnsembleError::InvalidDistribution { what: "r", .. }));
    }

    #[test]
    fn all_r_draws_come_before_lambda_draws() {
        let base = SimulationParams::default();
        let spec = PerturbationSpec::default();

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let two = draw_sensitivities(&mut rng, 2, &base, &spec).unwrap();

        // Replaying the stream by hand: r, r, lambda, lambda.
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let r_dist = Normal::new(base.r, spec.r_std_dev).unwrap();
        let l_dist = Normal::new(base.lambda_ecs, spec.lambda_ecs_std_dev).unwrap();
        let r0 = r_dist.sample(&mut rng);
        let r1 = r_dist.sample(&mut rng);
        let l0 = l_dist.sample(&mut rng);
        let l1 = l_dist.sample(&mut rng);

        assert_eq!(two[0], SensitivityDraw { r: r0, lambda_ecs: l0 });
        assert_eq!(two[1], SensitivityDraw { r: r1, lambda_ecs: l1 });
    }

    #[test]
    fn apply_holds_other_parameters_fixed() {
        let base = SimulationParams {
            c0: 390.0,
            seasonal_amp: 7.0,
            ..Default::default()
        };
        let p = SensitivityDraw {
            r: 0.004,
            lambda_ecs: 2.2,
        }
        .apply(&base);
        assert_eq!(p.c0, 390.0);
        assert_eq!(p.seasonal_amp, 7.0);
        assert_eq!(p.r, 0.004);
        assert_eq!(p.lambda_ecs, 2.2);
    }
}
