//! Logging infrastructure for the gitcfg library.
//!
//! Library internals report discovery and persistence decisions through the
//! `log` facade. This module adds a small stderr logger with configurable
//! verbosity for user-facing diagnostics of front ends such as the CLI.

use std::env;
use std::fmt;

use crate::error::{Error, ErrorKind};

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_VAR: &str = "GITCFG_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use gitcfg::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Everything, including the info and debug lines the caller emits.
    ///
    /// The library's own `log::debug!` records are separate and need a
    /// `log` backend installed by the application.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitcfg::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A stderr logger for config tooling.
///
/// Messages are prefixed with the program name, in the style of git's own
/// `fatal:`/`warning:` diagnostics.
///
/// # Examples
///
/// ```
/// use gitcfg::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("ignoring unreadable layer");
/// logger.info("not printed below Verbose");
/// ```
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether a message at `level` would be written.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level >= level && self.level != LogLevel::Quiet
    }

    /// Logs an error message.
    pub fn error(&self, message: &str) {
        if self.enabled(LogLevel::Normal) {
            eprintln!("error: {message}");
        }
    }

    /// Logs a warning message.
    pub fn warn(&self, message: &str) {
        if self.enabled(LogLevel::Normal) {
            eprintln!("warning: {message}");
        }
    }

    /// Logs an informational message (Verbose only).
    pub fn info(&self, message: &str) {
        if self.enabled(LogLevel::Verbose) {
            eprintln!("info: {message}");
        }
    }

    /// Logs a debug message (Verbose only).
    pub fn debug(&self, message: &str) {
        if self.enabled(LogLevel::Verbose) {
            eprintln!("debug: {message}");
        }
    }

    /// Reports a library error, adding a hint for the kinds users can act on.
    pub fn report(&self, err: &Error) {
        self.error(&err.to_string());
        if let Some(hint) = hint_for(err.kind()) {
            self.info(hint);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

fn hint_for(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::ParseError => Some("fix the line shown above or restore the file from a backup"),
        ErrorKind::ReadOnly => Some("pass an explicit target file to save an in-memory config"),
        ErrorKind::TypeMismatch => Some("booleans accept true/false/yes/no/on/off/1/0"),
        _ => None,
    }
}

/// Initializes a logger based on the environment and CLI flags.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet, verbose wins if both are set)
/// 2. `GITCFG_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// # Examples
///
/// ```
/// use gitcfg::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    let level = env::var(LOG_MODE_VAR)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .unwrap_or(LogLevel::Normal);
    Logger::new(level)
}
