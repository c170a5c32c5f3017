//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{BoxError, DomainError, ErrorChain, GoEnvError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("failed to find git root path: {source}")]
    GitRoot {
        #[source]
        source: BoxError,
    },

    #[error("failed to find go mod root path: {source}")]
    GoModuleRoot {
        #[source]
        source: BoxError,
    },

    #[error("failed to get GOMOD environment variable: {source}")]
    GoEnv {
        #[source]
        source: GoEnvError,
    },

    #[error("no project root found: {0}")]
    NoRoot(#[source] ErrorChain),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
