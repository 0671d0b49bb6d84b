//! Command execution with stdout capture.
//!
//! A submitted command string goes through three steps:
//!
//! 1. [`lexer::tokenize`] splits it into an argument vector.
//! 2. The configured [`Invocation`] decides which program runs with which
//!    arguments.
//! 3. A fresh [`LogFile`] receives the child's stdout while the request
//!    waits for the child to exit.

pub mod lexer;
pub mod log_file;

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use crate::config::{Invocation, ServerConfig};
use crate::error::ApiError;

pub use lexer::tokenize;
pub use log_file::LogFile;

/// Outcome of a command that ran to a successful exit.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    /// File holding the captured stdout.
    pub log_path: PathBuf,
    /// Program that was started.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Exit status of the child.
    pub status: ExitStatus,
}

/// Runs submitted commands according to the server configuration.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    log_dir: PathBuf,
    invocation: Invocation,
}

impl CommandExecutor {
    pub fn new(log_dir: impl Into<PathBuf>, invocation: Invocation) -> Self {
        Self {
            log_dir: log_dir.into(),
            invocation,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.log_dir.clone(), config.invocation.clone())
    }

    /// Turn an argument vector into `(program, args)` for the configured mode.
    pub fn plan(&self, argv: Vec<String>) -> Result<(String, Vec<String>), ApiError> {
        match &self.invocation {
            Invocation::PassThrough { program } => Ok((program.clone(), argv)),
            Invocation::FirstToken => {
                let mut tokens = argv.into_iter();
                let program = tokens
                    .next()
                    .ok_or_else(|| ApiError::Validation("cmd contains no program".to_string()))?;
                Ok((program, tokens.collect()))
            }
        }
    }

    /// Tokenize `cmd`, run it, and capture its stdout to a new log file.
    ///
    /// Blocks the calling task until the child exits. Stderr is inherited
    /// from the server and stdin is the null device. A child that exits
    /// unsuccessfully is reported as an execution error.
    pub async fn execute(&self, cmd: &str) -> Result<ExecutionReport, ApiError> {
        let argv = tokenize(cmd)?;
        let (program, args) = self.plan(argv)?;

        let log = LogFile::create(&self.log_dir)?;
        tracing::debug!(
            program = %program,
            args = ?args,
            log = %log.path().display(),
            "Starting command"
        );
        let (log_path, stdout) = log.into_parts();

        let status = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ApiError::Execution(format!("exec: \"{}\": {}", program, e)))?;

        if !status.success() {
            return Err(ApiError::Execution(describe_exit(status)));
        }

        tracing::info!(
            program = %program,
            log = %log_path.display(),
            "Command finished"
        );

        Ok(ExecutionReport {
            log_path,
            program,
            args,
            status,
        })
    }
}

/// Human-readable reason for an unsuccessful exit.
fn describe_exit(status: ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {}", code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("terminated by signal {}", signal);
        }
    }
    status.to_string()
}
