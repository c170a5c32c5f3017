//! Domain layer: error chains and root strategies
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod chain;
pub mod error;
pub mod root;

pub use chain::{error_find, error_is, BoxError, ErrorChain};
pub use error::{DomainError, GoEnvError};
pub use root::{expand_env_vars, parse_git_toplevel, parse_go_env, Root};
