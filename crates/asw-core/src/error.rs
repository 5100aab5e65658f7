use std::path::PathBuf;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error for {parameter}: {message}")]
    Configuration {
        parameter: &'static str,
        message: String,
    },

    #[error("Failed to read configuration file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No analysis type defined for case at alpha = {alpha}")]
    CaseDefinition { alpha: String },

    #[error("Duplicate alpha sample {formatted}: case and result paths would collide")]
    DuplicateAlpha { formatted: String },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed case file: {message}")]
    CaseFileFormat { message: String },
}

impl CoreError {
    pub(crate) fn config(parameter: &'static str, message: impl Into<String>) -> Self {
        CoreError::Configuration {
            parameter,
            message: message.into(),
        }
    }
}
