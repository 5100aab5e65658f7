//! Sweep orchestration.
//!
//! A sweep runs in two parallel phases separated by a hard barrier:
//! every case file is written before any solver process starts. Cases live
//! in a pre-allocated `Vec<Case>` and each worker receives exclusive
//! `&mut Case` access, so no two workers ever touch the same record. Result
//! extraction runs afterwards on the calling thread, in case order.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use asw_core::{Case, Geometry, SweepConfig, derive_cases, write_aero_case, write_stability_case};
use asw_results::{SweepManifest, SweepResult, TableStore, collect_modes, collect_polars};
use asw_solver::{Solver, prepare_case};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::AppResult;
use crate::progress::{SweepProgressEvent, SweepStage};
use crate::workspace;

/// Options for running a sweep.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Remove and recreate `cases/` and `results/` before starting
    pub prepare_workspace: bool,
    /// Persist the tables as JSON under `results/`
    pub save_tables: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            prepare_workspace: true,
            save_tables: true,
        }
    }
}

/// Request to execute a sweep.
pub struct SweepRequest<'a> {
    pub config: &'a SweepConfig,
    pub geometry: &'a Geometry,
    /// Directory holding `cases/` and `results/`; also the solver's cwd
    pub workdir: &'a Path,
    pub options: SweepOptions,
}

/// Wall-clock timing and execution summary for a sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepTimingSummary {
    pub write_time_s: f64,
    pub solve_time_s: f64,
    pub extract_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
    pub case_count: usize,
    pub workers: usize,
    /// Solver runs that exited with a non-zero status
    pub nonzero_exits: usize,
}

/// Response from a completed sweep.
#[derive(Debug, Clone)]
pub struct SweepResponse {
    pub result: SweepResult,
    pub cases: Vec<Case>,
    pub timing: SweepTimingSummary,
}

/// Owns the worker pool and drives one sweep's phases.
pub struct SweepOrchestrator<'a> {
    config: &'a SweepConfig,
    geometry: &'a Geometry,
    workdir: &'a Path,
    solver: &'a dyn Solver,
    pool: ThreadPool,
}

impl<'a> SweepOrchestrator<'a> {
    pub fn new(
        config: &'a SweepConfig,
        geometry: &'a Geometry,
        workdir: &'a Path,
        solver: &'a dyn Solver,
    ) -> AppResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("asw-worker-{}", i))
            .build()?;
        Ok(Self {
            config,
            geometry,
            workdir,
            solver,
            pool,
        })
    }

    /// Derive the case list and reject cases that request no analysis.
    pub fn cases(&self) -> AppResult<Vec<Case>> {
        plan_cases(self.config)
    }

    /// Phase 1: write every case file. Returns once all writes are done.
    pub fn write_cases(&self, cases: &mut [Case]) -> AppResult<()> {
        let workdir = self.workdir;
        self.pool.install(|| {
            cases
                .par_iter_mut()
                .try_for_each(|case| write_aero_case(workdir, case))
        })?;
        Ok(())
    }

    /// Phase 2: build each case's script and run the solver on it.
    ///
    /// Returns the number of solver runs that exited with a non-zero status.
    pub fn analyze_cases(&self, cases: &mut [Case]) -> AppResult<usize> {
        let nonzero = AtomicUsize::new(0);
        let geometry = self.geometry;
        let units = self.config.units.as_str();
        let solver = self.solver;

        self.pool.install(|| {
            cases.par_iter_mut().try_for_each(|case| -> AppResult<()> {
                let script = prepare_case(case, geometry, units)?;
                tracing::debug!(alpha = case.alpha, "invoking solver");
                let exit = solver.invoke(&script)?;
                if !exit.success() {
                    nonzero.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        alpha = case.alpha,
                        code = ?exit.code,
                        "solver exited with non-zero status"
                    );
                }
                Ok(())
            })
        })?;

        Ok(nonzero.into_inner())
    }

    /// Decode the requested reports of every case into tables.
    pub fn extract_results(&self, cases: &mut [Case]) -> AppResult<SweepResult> {
        let analyses = self.config.analyses;
        let modes = if analyses.modes {
            Some(collect_modes(self.workdir, cases)?)
        } else {
            None
        };
        let polars = if analyses.polars {
            Some(collect_polars(self.workdir, cases)?)
        } else {
            None
        };
        Ok(SweepResult { polars, modes })
    }
}

/// Derive the runnable case list for a config.
///
/// Fails with a `CaseDefinition` error if a case requests no analysis.
pub fn plan_cases(config: &SweepConfig) -> AppResult<Vec<Case>> {
    let cases = derive_cases(config)?;
    for case in &cases {
        case.require_analyses()?;
    }
    Ok(cases)
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(SweepProgressEvent)>,
    stage: SweepStage,
    started: Instant,
    case_count: usize,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(SweepProgressEvent {
            stage,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            case_count,
            message,
        });
    }
}

/// Execute a sweep.
pub fn run_sweep(request: &SweepRequest, solver: &dyn Solver) -> AppResult<SweepResponse> {
    run_sweep_with_progress(request, solver, None)
}

/// Execute a sweep and stream stage events.
pub fn run_sweep_with_progress(
    request: &SweepRequest,
    solver: &dyn Solver,
    mut progress_cb: Option<&mut dyn FnMut(SweepProgressEvent)>,
) -> AppResult<SweepResponse> {
    let started = Instant::now();
    let mut timing = SweepTimingSummary {
        workers: request.config.workers,
        ..Default::default()
    };

    let orchestrator =
        SweepOrchestrator::new(request.config, request.geometry, request.workdir, solver)?;
    let mut cases = orchestrator.cases()?;
    let count = cases.len();
    timing.case_count = count;

    if request.options.prepare_workspace {
        emit_progress(
            &mut progress_cb,
            SweepStage::PreparingWorkspace,
            started,
            count,
            None,
        );
        workspace::prepare_workspace(request.workdir)?;
    }

    tracing::info!(cases = count, workers = request.config.workers, "writing case files");
    emit_progress(&mut progress_cb, SweepStage::WritingCases, started, count, None);
    let phase = Instant::now();
    orchestrator.write_cases(&mut cases)?;
    timing.write_time_s = phase.elapsed().as_secs_f64();

    tracing::info!(cases = count, geometry = %request.geometry.name, "running solver");
    emit_progress(&mut progress_cb, SweepStage::RunningSolver, started, count, None);
    let phase = Instant::now();
    timing.nonzero_exits = orchestrator.analyze_cases(&mut cases)?;
    timing.solve_time_s = phase.elapsed().as_secs_f64();

    emit_progress(&mut progress_cb, SweepStage::ExtractingResults, started, count, None);
    let phase = Instant::now();
    let result = orchestrator.extract_results(&mut cases)?;
    timing.extract_time_s = phase.elapsed().as_secs_f64();

    if request.options.save_tables {
        emit_progress(&mut progress_cb, SweepStage::SavingResults, started, count, None);
        let phase = Instant::now();
        let store = TableStore::new(request.workdir.join(asw_core::RESULTS_DIR))?;
        let manifest = SweepManifest::new(
            request.geometry.name.clone(),
            request.geometry.file.display().to_string(),
            count,
            request.config.clone(),
        );
        store.save(&manifest, &result)?;
        timing.save_time_s = phase.elapsed().as_secs_f64();
    }

    timing.total_time_s = started.elapsed().as_secs_f64();
    emit_progress(
        &mut progress_cb,
        SweepStage::Completed,
        started,
        count,
        Some(format!("{} cases", count)),
    );
    tracing::info!(
        cases = count,
        total_s = timing.total_time_s,
        "sweep completed"
    );

    Ok(SweepResponse {
        result,
        cases,
        timing,
    })
}

/// Write the stability reference case (`cases/tail.case`) for a config.
///
/// Returns the path of the written file, relative to `workdir`.
pub fn write_reference_case(workdir: &Path, config: &SweepConfig) -> AppResult<PathBuf> {
    workspace::ensure_cases_dir(workdir)?;
    let path = write_stability_case(workdir, &config.mass)?;
    tracing::info!(path = %path.display(), "wrote stability reference case");
    Ok(path)
}
