//! Static server configuration.
//!
//! Everything the handlers need to know about their environment lives in
//! [`ServerConfig`], which is built once by the binary and shared through
//! the router state.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default directory for captured stdout, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// The single origin browsers may call the API from.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://co.mmon.co";

/// Program that receives the tokenized command in pass-through mode.
pub const DEFAULT_PASS_THROUGH_PROGRAM: &str = "echo";

/// How a tokenized command is turned into a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run a fixed program with every token as an argument.
    PassThrough { program: String },
    /// Run the first token as the program, the remaining tokens as arguments.
    FirstToken,
}

impl Default for Invocation {
    fn default() -> Self {
        Invocation::PassThrough {
            program: DEFAULT_PASS_THROUGH_PROGRAM.to_string(),
        }
    }
}

/// Configuration shared by the router and the command executor.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub bind_addr: SocketAddr,
    /// Directory where `*-stdout.log` files are written. Must already exist.
    pub log_dir: PathBuf,
    /// Origin allowed by the CORS policy.
    pub allowed_origin: String,
    /// Subprocess construction mode.
    pub invocation: Invocation,
}

impl ServerConfig {
    pub fn new() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            invocation: Invocation::default(),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    pub fn with_invocation(mut self, invocation: Invocation) -> Self {
        self.invocation = invocation;
        self
    }

    /// Log directory as a path.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_static_configuration() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.log_dir(), Path::new("logs"));
        assert_eq!(config.allowed_origin, "https://co.mmon.co");
        assert_eq!(
            config.invocation,
            Invocation::PassThrough {
                program: "echo".to_string()
            }
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig::new()
            .with_log_dir("/tmp/out")
            .with_allowed_origin("https://example.org")
            .with_invocation(Invocation::FirstToken);

        assert_eq!(config.log_dir(), Path::new("/tmp/out"));
        assert_eq!(config.allowed_origin, "https://example.org");
        assert_eq!(config.invocation, Invocation::FirstToken);
    }
}
