//! Library exports for gitcfg-cli.
//!
//! The CLI structure is exported so it can be inspected from tests and
//! rendered into documentation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
