//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent invalid input to the pure layer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid Root {0}")]
    InvalidRoot(i32),

    #[error("unknown root strategy: {0} (expected one of: git, go-module)")]
    UnknownRoot(String),
}

/// Failures interpreting `go env -json` output.
#[derive(Error, Debug)]
pub enum GoEnvError {
    #[error("malformed go env output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GOMOD is not set: not inside a go module")]
    NotInModule,

    #[error("GOMOD has no parent directory: {0}")]
    NoParent(PathBuf),
}
