//! Errors raised while loading dictionaries and configuration.
//!
//! Scoring itself never fails; only the file-backed resources do.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyseError>;

#[derive(Error, Debug)]
pub enum AnalyseError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not match the expected entry shape.
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// An IDF value was NaN, infinite or negative.
    #[error("idf for {term:?} must be finite and non-negative, got {value}")]
    InvalidIdf { term: String, value: f64 },

    /// The JSON configuration file could not be parsed.
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalyseError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed { path: path.into(), line, reason: reason.into() }
    }

    /// Line number of a malformed entry, if that is what went wrong.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            _ => None,
        }
    }
}
