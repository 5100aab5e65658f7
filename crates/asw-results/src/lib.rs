//! asw-results: solver report decoding and sweep table storage.

pub mod extract;
pub mod store;
pub mod types;

pub use extract::{
    collect_modes, collect_polars, decode_modes, decode_polars, read_modes, read_polars,
};
pub use store::{SweepManifest, TableStore};
pub use types::*;

use std::path::PathBuf;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Result file {} is malformed at line {}: {}", .path.display(), .row + 1, .message)]
    ResultFormat {
        path: PathBuf,
        row: usize,
        token: Option<usize>,
        message: String,
    },

    #[error("Failed to read result file: {}", .path.display())]
    ResultFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case at alpha = {alpha} has no {what} result file")]
    MissingResultPath { alpha: String, what: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stored tables not found in {}", .path.display())]
    TablesNotFound { path: PathBuf },
}
