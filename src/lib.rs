//! # boinc-api
//!
//! A small HTTP service that accepts shell-style command strings, runs them
//! as subprocesses and captures their standard output to per-request log
//! files.

pub mod config;
pub mod error;
pub mod executor;
pub mod server;

pub use config::{Invocation, ServerConfig};
pub use error::ApiError;
pub use executor::{CommandExecutor, ExecutionReport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
