use std::path::PathBuf;

use pedigree::{RecordError, TreeError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for invocations that ask the engine to do something impossible.
pub const EXIT_USAGE: i32 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("chart error: {0}")]
    Chart(#[from] TreeError),

    #[error("record error: {0}")]
    Record(#[from] RecordError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Chart(err) | Self::Record(RecordError::Tree(err)) if err.is_caller_bug() => {
                EXIT_USAGE
            }
            Self::InvalidArgument { .. } => EXIT_USAGE,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
