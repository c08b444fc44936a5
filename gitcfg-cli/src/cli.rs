//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, GetCommand, ListCommand, SetCommand, ShowPathsCommand, UnsetCommand,
    ValidateCommand,
};
use crate::utils::Scope;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for layered git configuration.
#[derive(Parser)]
#[command(name = "gitcfg")]
#[command(version, about = "Read and write layered git configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use the system-wide config file
    #[arg(long, global = true, conflicts_with_all = ["global", "local", "file"])]
    pub system: bool,

    /// Use the per-user config file
    #[arg(long, global = true, conflicts_with_all = ["local", "file"])]
    pub global: bool,

    /// Use the repository config file
    #[arg(long, global = true, conflicts_with = "file")]
    pub local: bool,

    /// Use the given config file
    #[arg(long, short = 'f', value_name = "PATH", global = true, env = "GITCFG_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The scope selected by the flags.
    pub fn scope(&self) -> Scope {
        if self.system {
            Scope::System
        } else if self.global {
            Scope::Global
        } else if self.local {
            Scope::Local
        } else if let Some(path) = &self.file {
            Scope::File(path.clone())
        } else {
            Scope::Default
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the value of a key
    Get(GetCommand),

    /// Set the value of a key
    Set(SetCommand),

    /// Remove a key
    Unset(UnsetCommand),

    /// List effective settings
    List(ListCommand),

    /// Show where each config layer is read from
    ShowPaths(ShowPathsCommand),

    /// Check that a config file parses
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
