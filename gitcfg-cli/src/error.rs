//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use gitcfg::{Error as LibError, ErrorKind};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error while writing output.
    Io(std::io::Error),

    /// A lookup found nothing; reported through the exit code alone.
    Missing,
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Key or config file not found
    /// - 2: Invalid arguments or key
    /// - 3: Parse error in a config file
    /// - 4: Value does not match the requested type
    /// - 5: I/O error
    /// - 6: Other errors (e.g. read-only target)
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Missing => 1,
            CliError::InvalidArguments(_) => 2,
            CliError::Io(_) => 5,
            CliError::Library(lib_err) => match lib_err.kind() {
                ErrorKind::NotFound => 1,
                ErrorKind::InvalidInput => 2,
                ErrorKind::ParseError => 3,
                ErrorKind::TypeMismatch => 4,
                ErrorKind::IoError => 5,
                ErrorKind::ReadOnly => 6,
            },
        }
    }

    /// Whether the error should be printed.
    pub fn is_silent(&self) -> bool {
        matches!(self, CliError::Missing)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Missing => write!(f, "not found"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
