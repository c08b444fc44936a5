//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Print the value of a key
//! - `set`: Set, add or replace values of a key
//! - `unset`: Remove a key
//! - `list`: List effective settings
//! - `show_paths`: Show where each config layer is read from
//! - `validate`: Check that a config file parses
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod get;
pub mod list;
pub mod set;
pub mod show_paths;
pub mod unset;
pub mod validate;

pub use completions::CompletionsCommand;
pub use get::GetCommand;
pub use list::ListCommand;
pub use set::SetCommand;
pub use show_paths::ShowPathsCommand;
pub use unset::UnsetCommand;
pub use validate::ValidateCommand;

use clap::ValueEnum;
use gitcfg::value;
use std::path::Path;

/// How a value is interpreted and printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ValueType {
    /// Raw text
    #[default]
    String,
    /// true/false, also accepting yes/no/on/off/1/0
    Bool,
    /// Decimal integer with optional k/m/g suffix
    Int,
    /// Path with ~ expanded
    Path,
}

impl ValueType {
    /// Canonical text of `raw` under this type, as printed by `get`.
    ///
    /// An implicit value (`None`) reads as true for booleans and as the
    /// empty string otherwise.
    pub fn render(self, key: &str, raw: Option<&str>, home: Option<&Path>) -> gitcfg::Result<String> {
        match self {
            ValueType::String => Ok(raw.unwrap_or_default().to_string()),
            ValueType::Bool => value::parse_bool(key, raw).map(|b| value::format_bool(b).to_string()),
            ValueType::Int => value::parse_int(key, raw.unwrap_or_default()).map(|n| n.to_string()),
            ValueType::Path => value::parse_path(key, raw.unwrap_or_default(), home)
                .map(|p| p.display().to_string()),
        }
    }

    /// Text to store for a value given on the command line.
    ///
    /// Booleans and integers are normalized; paths and strings are stored
    /// as given so `~` keeps its meaning for other users of the file.
    pub fn normalize(self, key: &str, input: &str) -> gitcfg::Result<String> {
        match self {
            ValueType::String | ValueType::Path => Ok(input.to_string()),
            ValueType::Bool => value::parse_bool(key, Some(input)).map(|b| value::format_bool(b).to_string()),
            ValueType::Int => value::parse_int(key, input).map(|n| n.to_string()),
        }
    }
}
