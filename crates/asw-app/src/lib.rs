//! Shared application service layer for aerosweep.
//!
//! This crate sequences a sweep for the CLI: workspace bootstrap, the
//! parallel case-writing and solver phases, result extraction and table
//! persistence.

pub mod error;
pub mod progress;
pub mod sweep_service;
pub mod workspace;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{SweepProgressEvent, SweepStage};
pub use sweep_service::{
    plan_cases, run_sweep, run_sweep_with_progress, write_reference_case, SweepOptions,
    SweepOrchestrator, SweepRequest, SweepResponse, SweepTimingSummary,
};
pub use workspace::{ensure_cases_dir, prepare_workspace};
