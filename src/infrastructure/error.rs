//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// Infrastructure errors wrap application errors and add process-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("`{program}` failed ({status}): {stderr}")]
    Command {
        program: String,
        status: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}
