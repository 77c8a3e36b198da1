//! Monte Carlo ensemble execution.

use crate::{EnsembleError, EnsembleResult, PerturbationSpec, SensitivityDraw, draw_sensitivities};
use cc_core::RunIndex;
use cc_model::{SimulationParams, SimulationTable, Year, YearSequence, simulate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

/// Everything needed to run one ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleRequest {
    /// Number of ensemble members, at least one.
    pub runs: usize,
    pub year_start: Year,
    pub year_end: Year,
    /// Centre values; only `r` and `lambda_ecs` are perturbed.
    pub base: SimulationParams,
    pub perturbation: PerturbationSpec,
    /// Fixed seed for reproducible output; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl EnsembleRequest {
    pub fn new(runs: usize, year_start: Year, year_end: Year, base: SimulationParams) -> Self {
        Self {
            runs,
            year_start,
            year_end,
            base,
            perturbation: PerturbationSpec::default(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_perturbation(mut self, perturbation: PerturbationSpec) -> Self {
        self.perturbation = perturbation;
        self
    }

    /// Generator for this request: seeded ChaCha when `seed` is set, OS entropy otherwise.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Check run count and year range without drawing anything.
    pub fn validate(&self) -> EnsembleResult<YearSequence> {
        if self.runs < 1 {
            return Err(EnsembleError::InvalidRunCount { runs: self.runs });
        }
        if u32::try_from(self.runs).is_err() {
            return Err(EnsembleError::TooManyRuns { runs: self.runs });
        }
        Ok(YearSequence::range(self.year_start, self.year_end)?)
    }
}

/// Run the ensemble described by `request`.
///
/// Output holds `runs * years` rows grouped by ascending run index.
pub fn monte_carlo(request: &EnsembleRequest) -> EnsembleResult<SimulationTable> {
    monte_carlo_with_rng(request, &mut request.rng())
}

/// Run the ensemble with a caller-supplied generator; `request.seed` is ignored.
pub fn monte_carlo_with_rng<R: Rng + ?Sized>(
    request: &EnsembleRequest,
    rng: &mut R,
) -> EnsembleResult<SimulationTable> {
    let years = request.validate()?;

    debug!(runs = request.runs, years = %years, "drawing ensemble parameters");
    let draws = draw_sensitivities(rng, request.runs, &request.base, &request.perturbation)?;

    let table = run_draws(&years, &request.base, &draws)?;
    info!(
        runs = request.runs,
        rows = table.len(),
        "ensemble complete"
    );
    Ok(table)
}

/// Simulate every draw and concatenate the tagged tables in draw order.
pub fn run_draws(
    years: &YearSequence,
    base: &SimulationParams,
    draws: &[SensitivityDraw],
) -> EnsembleResult<SimulationTable> {
    let tables = draws
        .par_iter()
        .enumerate()
        .map(|(i, draw)| {
            let run = u32::try_from(i)
                .ok()
                .and_then(RunIndex::from_index)
                .ok_or(EnsembleError::TooManyRuns { runs: draws.len() })?;
            Ok(simulate(years, &draw.apply(base)).with_run(run))
        })
        .collect::<EnsembleResult<Vec<_>>>()?;

    Ok(SimulationTable::concat(tables))
}
