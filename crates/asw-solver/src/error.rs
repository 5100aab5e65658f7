//! Solver protocol and process errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    /// The case requests neither a polar nor a mode analysis.
    #[error("No analysis type defined for case at alpha = {alpha}")]
    CaseDefinition { alpha: String },

    /// A command script was requested before the case file was written.
    #[error("Case at alpha = {alpha} has no case file")]
    MissingCaseFile { alpha: String },

    /// The solver executable could not be started.
    #[error("Failed to start solver {executable}")]
    Spawn {
        executable: PathBuf,
        source: std::io::Error,
    },

    /// Feeding the script or waiting for exit failed.
    #[error("Solver communication failed: {what}")]
    Communicate {
        what: &'static str,
        source: std::io::Error,
    },
}
