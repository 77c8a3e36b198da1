//! cc-ensemble: Monte Carlo ensembles over the climate response model.
//!
//! The runner perturbs the CO2 growth rate `r` and the climate sensitivity
//! `lambda_ecs` with Gaussian noise, simulates each draw, and concatenates the
//! per-run tables tagged with their run index.
//!
//! # Architecture
//!
//! Draw-then-dispatch: all `2n` random values come from one generator before
//! any simulation starts (all `r` draws, then all `lambda_ecs` draws). The
//! simulations themselves are independent and run on the rayon pool; results
//! are collected in run order, so a seeded ensemble is identical regardless of
//! thread count.

pub mod error;
pub mod perturbation;
pub mod runner;
pub mod summary;

// Re-exports for ergonomics
pub use error::{EnsembleError, EnsembleResult};
pub use perturbation::{PerturbationSpec, SensitivityDraw, draw_sensitivities};
pub use runner::{EnsembleRequest, monte_carlo, monte_carlo_with_rng, run_draws};
pub use summary::{SeriesStats, YearSummary, summarize_by_year};
