//! Error types for session construction, case parsing and the worker boundary

use crate::ir::MAX_INPUTS;
use thiserror::Error;

/// The case set or depth cannot form a search session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No cases provided")]
    NoCases,
    #[error("Each case must have the same number of inputs: case {index} has {found}, expected {expected}")]
    ArityMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Maximum depth must be at least 1")]
    ZeroDepth,
    #[error("Too many inputs: {0} (at most {max})", max = MAX_INPUTS)]
    TooManyInputs(usize),
}

/// A case written as `inputs=output` could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseParseError {
    #[error("Missing '=' in case '{0}' (expected e.g. 1,2=3)")]
    MissingOutput(String),
    #[error("Invalid number '{value}' in case '{case}'")]
    InvalidNumber { case: String, value: String },
}

/// The background worker is no longer reachable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("Worker channel disconnected")]
    Disconnected,
    #[error("Worker thread panicked")]
    Panicked,
}

/// A case file could not be read
#[derive(Error, Debug)]
pub enum CaseFileError {
    #[error("Failed to read case file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid case file: {0}")]
    Json(#[from] serde_json::Error),
}

/// The JSON-lines front end stopped
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Worker(#[from] WorkerError),
}
