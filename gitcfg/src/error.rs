//! Error types for the gitcfg library.
//!
//! This module provides the error hierarchy for all configuration
//! operations, using `thiserror` for ergonomic error handling. Every
//! variant maps onto a coarse [`ErrorKind`] so that binding layers can
//! translate failures into distinct host-language exceptions.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a gitcfg error.
///
/// # Examples
///
/// ```
/// use gitcfg::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the gitcfg library.
#[derive(Debug, Error)]
pub enum Error {
    /// A key, or a well-known configuration file, does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// What was looked for.
        resource: String,
    },

    /// A configuration file contains malformed syntax.
    #[error("{}:{line}:{column}: {message}", path.as_ref().map_or_else(|| "<memory>".to_string(), |p| p.display().to_string()))]
    Parse {
        /// File being parsed, if it came from disk.
        path: Option<PathBuf>,
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
        /// What went wrong.
        message: String,
    },

    /// A typed accessor was used on a value that does not conform.
    #[error("invalid {expected} value for '{key}': '{value}'")]
    TypeMismatch {
        /// The key being read.
        key: String,
        /// The raw value found.
        value: String,
        /// The type that was requested.
        expected: &'static str,
    },

    /// A save was requested for a layer with no backing file.
    #[error("read-only configuration: {reason}")]
    ReadOnly {
        /// Why the write cannot be persisted.
        reason: String,
    },

    /// A configuration key is syntactically invalid.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// The reason the key is invalid.
        reason: String,
    },

    /// A value pattern for a multi-valued operation is not a valid regex.
    #[error("invalid value pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// The regex compiler's complaint.
        message: String,
    },

    /// An environment variable carrying configuration is malformed.
    #[error("invalid environment variable {variable}: {message}")]
    InvalidEnvironment {
        /// The offending variable.
        variable: String,
        /// A description of the problem.
        message: String,
    },

    /// A read or write failed for a reason other than absence.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Key absent, or configuration file absent for discovery calls.
    NotFound,
    /// Malformed on-disk syntax.
    ParseError,
    /// Typed accessor on a non-conforming value.
    TypeMismatch,
    /// Save attempted on a layer with no backing path.
    ReadOnly,
    /// Read/write failure distinct from "not found".
    IoError,
    /// Invalid key, value pattern, or environment override.
    InvalidInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::ParseError => write!(f, "parse error"),
            Self::TypeMismatch => write!(f, "type mismatch"),
            Self::ReadOnly => write!(f, "read-only"),
            Self::IoError => write!(f, "I/O error"),
            Self::InvalidInput => write!(f, "invalid input"),
        }
    }
}

impl Error {
    /// Builds the error for a key with no entry.
    #[must_use]
    pub fn key_not_found(key: &str) -> Self {
        Self::NotFound {
            resource: format!("config value '{key}'"),
        }
    }

    /// Builds the error for a well-known configuration file that could not
    /// be located, e.g. `"system"` or `"global"`.
    #[must_use]
    pub fn config_not_found(scope: &str) -> Self {
        Self::NotFound {
            resource: format!("{scope} config file"),
        }
    }

    /// Wraps an I/O error, classifying a missing file as [`Error::NotFound`].
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                resource: format!("config file {}", path.display()),
            }
        } else {
            Self::Io { path, source }
        }
    }

    /// Compiles a value pattern for the multi-valued operations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if `pattern` is not a valid regex.
    pub fn compile_pattern(pattern: &str) -> Result<regex::Regex> {
        regex::Regex::new(pattern).map_err(|e| Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the coarse classification of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcfg::{Error, ErrorKind};
    ///
    /// let err = Error::key_not_found("core.bare");
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Parse { .. } => ErrorKind::ParseError,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::ReadOnly { .. } => ErrorKind::ReadOnly,
            Self::Io { .. } => ErrorKind::IoError,
            Self::InvalidKey { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidEnvironment { .. } => ErrorKind::InvalidInput,
        }
    }

    /// Check if error indicates a missing key or file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
