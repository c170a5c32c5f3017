//! Project root discovery and composable error chains.
//!
//! Layers:
//! - [`domain`]: pure types ([`ErrorChain`], [`Root`]) and output parsers
//! - [`application`]: services that drive external tools through I/O traits
//! - [`infrastructure`]: real I/O implementations and the service container
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{ErrorChain, Root};
