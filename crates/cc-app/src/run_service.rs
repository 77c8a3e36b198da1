//! Run execution and caching service.

use std::path::{Path, PathBuf};
use std::time::Instant;

use cc_core::timing::{RunStats, Timer};
use cc_ensemble::{
    EnsembleError, EnsembleRequest, PerturbationSpec, YearSummary, draw_sensitivities, run_draws,
    summarize_by_year,
};
use cc_model::{SimulationParams, SimulationTable, Year, YearSequence, simulate};
use cc_results::{MODEL_VERSION, RunManifest, RunStore, RunType, compute_run_id};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};

/// Run mode specification.
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    Single,
    Ensemble {
        runs: usize,
        /// `None` draws a fresh seed, which is then recorded in the manifest.
        seed: Option<u64>,
        perturbation: PerturbationSpec,
    },
}

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    /// Run store root; `None` disables caching and persistence.
    pub store_dir: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            store_dir: None,
        }
    }
}

/// Request to execute a run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub scenario_name: String,
    pub year_start: Year,
    pub year_end: Year,
    pub parameters: SimulationParams,
    pub mode: RunMode,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub table: SimulationTable,
    pub loaded_from_cache: bool,
    /// Per-year spread, ensembles only.
    pub summary: Option<Vec<YearSummary>>,
    pub stats: RunStats,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    mode: &RunMode,
    stage: RunStage,
    started: Instant,
    detail: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage,
            elapsed_s: started.elapsed().as_secs_f64(),
            ensemble_runs: match mode {
                RunMode::Single => None,
                RunMode::Ensemble { runs, .. } => Some(*runs),
            },
            detail,
        });
    }
}

/// Execute or load a run based on request.
pub fn execute_run(request: &RunRequest) -> AppResult<RunResponse> {
    execute_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn execute_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut stats = RunStats::default();

    emit_progress(&mut progress_cb, &request.mode, RunStage::Validating, started, None);
    let years = YearSequence::range(request.year_start, request.year_end)?;
    let run_type = resolve_run_type(&request.mode)?;
    let run_id = compute_run_id(&years, &request.parameters, &run_type, MODEL_VERSION);
    debug!(run_id = %run_id, years = %years, "resolved run request");

    let store = request
        .options
        .store_dir
        .as_ref()
        .map(|dir| RunStore::new(dir.clone()))
        .transpose()?;

    if let Some(store) = &store
        && request.options.use_cache
    {
        emit_progress(&mut progress_cb, &request.mode, RunStage::CheckingCache, started, None);
        if store.has_run(&run_id) {
            emit_progress(
                &mut progress_cb,
                &request.mode,
                RunStage::LoadingCachedResult,
                started,
                Some(run_id.clone()),
            );
            let manifest = store.load_manifest(&run_id)?;
            let table = store.load_table(&run_id)?;
            info!(run_id = %run_id, rows = table.len(), "loaded run from cache");

            stats.runs = run_count(&manifest.run_type);
            stats.rows = table.len();
            let summary = summary_for(&manifest.run_type, &table);
            emit_progress(&mut progress_cb, &request.mode, RunStage::Completed, started, None);
            return Ok(RunResponse {
                run_id,
                manifest,
                table,
                loaded_from_cache: true,
                summary,
                stats,
            });
        }
    }

    let table = match &run_type {
        RunType::Single => {
            emit_progress(&mut progress_cb, &request.mode, RunStage::Simulating, started, None);
            let timer = Timer::start("simulate");
            let table = simulate(&years, &request.parameters);
            stats.simulate_time_s = timer.stop().unwrap_or_default();
            stats.runs = 1;
            table
        }
        RunType::Ensemble {
            runs,
            seed,
            perturbation,
        } => {
            let ensemble = EnsembleRequest::new(*runs, years.start(), years.end(), request.parameters)
                .with_seed(*seed)
                .with_perturbation(*perturbation);
            ensemble.validate()?;

            emit_progress(
                &mut progress_cb,
                &request.mode,
                RunStage::DrawingParameters,
                started,
                Some(format!("{} runs, seed {}", runs, seed)),
            );
            let timer = Timer::start("draw");
            let draws = draw_sensitivities(
                &mut ensemble.rng(),
                *runs,
                &request.parameters,
                perturbation,
            )?;
            stats.draw_time_s = timer.stop().unwrap_or_default();

            emit_progress(&mut progress_cb, &request.mode, RunStage::Simulating, started, None);
            let timer = Timer::start("simulate");
            let table = run_draws(&years, &request.parameters, &draws)?;
            stats.simulate_time_s = timer.stop().unwrap_or_default();
            stats.runs = *runs;
            table
        }
    };
    stats.rows = table.len();

    if let Some(found) = table.first_non_finite() {
        warn!(%found, "simulation produced non-finite values");
    }

    let manifest = RunManifest::new(
        request.scenario_name.clone(),
        &years,
        request.parameters,
        run_type,
        table.len(),
    );

    if let Some(store) = &store {
        if manifest.is_persistable() {
            emit_progress(&mut progress_cb, &request.mode, RunStage::SavingResults, started, None);
            let timer = Timer::start("store");
            store.save_run(&manifest, &table)?;
            stats.store_time_s = timer.stop().unwrap_or_default();
        } else {
            warn!(run_id = %manifest.run_id, "non-finite parameters; run not stored");
        }
    }

    info!(
        run_id = %manifest.run_id,
        rows = table.len(),
        runs = stats.runs,
        "run complete"
    );
    emit_progress(&mut progress_cb, &request.mode, RunStage::Completed, started, None);

    let summary = summary_for(&manifest.run_type, &table);
    Ok(RunResponse {
        run_id: manifest.run_id.clone(),
        manifest,
        table,
        loaded_from_cache: false,
        summary,
        stats,
    })
}

/// Fix the seed of unseeded ensembles so the manifest can reproduce them.
fn resolve_run_type(mode: &RunMode) -> AppResult<RunType> {
    match mode {
        RunMode::Single => Ok(RunType::Single),
        RunMode::Ensemble {
            runs,
            seed,
            perturbation,
        } => {
            if *runs < 1 {
                return Err(EnsembleError::InvalidRunCount { runs: *runs }.into());
            }
            let seed = seed.unwrap_or_else(|| {
                let drawn = rand::random::<u64>();
                debug!(seed = drawn, "drew ensemble seed");
                drawn
            });
            Ok(RunType::Ensemble {
                runs: *runs,
                seed,
                perturbation: *perturbation,
            })
        }
    }
}

fn run_count(run_type: &RunType) -> usize {
    match run_type {
        RunType::Single => 1,
        RunType::Ensemble { runs, .. } => *runs,
    }
}

fn summary_for(run_type: &RunType, table: &SimulationTable) -> Option<Vec<YearSummary>> {
    match run_type {
        RunType::Single => None,
        RunType::Ensemble { .. } => Some(summarize_by_year(table)),
    }
}

/// Write `table` as CSV; returns elapsed seconds when timing is enabled.
pub fn export_csv(table: &SimulationTable, path: &Path) -> AppResult<Option<f64>> {
    let timer = Timer::start("export");
    cc_results::write_csv_file(table, path).map_err(|e| match e {
        cc_results::ResultsError::Io(source) => AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })?;
    Ok(timer.stop())
}

/// Stored runs in `store_dir`, optionally filtered by scenario name.
pub fn list_runs(store_dir: &Path, scenario_name: Option<&str>) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::new(store_dir.to_path_buf())?;
    let runs = match scenario_name {
        Some(name) => store.list_runs_for(name)?,
        None => store.list_runs()?,
    };
    Ok(runs)
}
