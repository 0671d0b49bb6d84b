//! Shell-style tokenization of submitted commands.

use crate::error::ApiError;

/// Message returned when the request carries no command.
pub const MISSING_CMD: &str = "cmd is required";

/// Split `cmd` into an argument vector using POSIX shell quoting rules.
///
/// Whitespace separates words; single quotes, double quotes and backslash
/// escapes are honoured. Nothing is expanded. An empty `cmd` is rejected
/// before lexing; unbalanced quoting surfaces the lexer's message.
pub fn tokenize(cmd: &str) -> Result<Vec<String>, ApiError> {
    if cmd.is_empty() {
        return Err(ApiError::Validation(MISSING_CMD.to_string()));
    }
    shell_words::split(cmd).map_err(|e| ApiError::Validation(e.to_string()))
}
