//! Executor error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults that abort a running program
///
/// The only fault class is input coercion; every other malformed construct
/// degrades to a fallback value instead.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum RuntimeError {
    #[error("Invalid input: expected integer, got '{0}'")]
    ExpectedInteger(String),

    #[error("Invalid input: expected float, got '{0}'")]
    ExpectedFloat(String),

    #[error("Invalid input: expected boolean (true/false), got '{0}'")]
    ExpectedBoolean(String),
}

/// Errors from driving the VM through its public API
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("execution is not awaiting input")]
    NotSuspended,

    #[error("invalid execution snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
