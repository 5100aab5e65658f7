//! Error types for the asw-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the sweep crates and
/// provides a single error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] asw_core::CoreError),

    #[error(transparent)]
    Solver(#[from] asw_solver::SolverError),

    #[error(transparent)]
    Results(#[from] asw_results::ResultsError),

    #[error("Failed to prepare sweep directory: {path}")]
    Workspace {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for asw-app operations.
pub type AppResult<T> = Result<T, AppError>;
