//! Request and response messages exchanged with the search worker.
//!
//! Both enums are internally tagged on `type` so they read as flat JSON
//! objects: `{"type":"batch","count":1000}`.

use crate::ir::Case;
use crate::search::config::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_DEPTH};
use crate::search::result::{BatchResult, Pass};
use serde::{Deserialize, Serialize};

fn default_count() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Start a new session, replacing any existing one
    Init {
        cases: Vec<Case>,
        #[serde(default = "default_max_depth")]
        max_depth: usize,
    },
    /// Run one batch on the current session
    Batch {
        #[serde(default = "default_count")]
        count: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ready,
    Error { error: String },
    Result(BatchReport),
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub rendered_text: String,
    pub cost: u32,
}

impl From<&Pass> for PassReport {
    fn from(pass: &Pass) -> Self {
        Self {
            rendered_text: pass.rendered_text.clone(),
            cost: pass.cost,
        }
    }
}

/// Wire form of a [`BatchResult`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub exhausted: bool,
    pub passes: Vec<PassReport>,
    pub failure_count: u64,
    pub failure_samples: Vec<String>,
    /// Candidates pulled in this batch, skipped ones included
    #[serde(default)]
    pub pulled: u64,
    /// Pulled candidates that read no input
    #[serde(default)]
    pub skipped: u64,
}

impl From<&BatchResult> for BatchReport {
    fn from(result: &BatchResult) -> Self {
        Self {
            exhausted: result.exhausted,
            passes: result.passes.iter().map(PassReport::from).collect(),
            failure_count: result.failure_count,
            failure_samples: result.failure_samples.clone(),
            pulled: result.pulled,
            skipped: result.skipped,
        }
    }
}
