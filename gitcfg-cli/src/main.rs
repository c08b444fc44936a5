//! Main entry point for the gitcfg CLI.
//!
//! Reads and writes git configuration the way git does:
//! - `get`: Print the effective value of a key
//! - `set` / `unset`: Change a single config file
//! - `list`: Print every effective setting
//! - `show-paths`: Show which files make up each layer

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = gitcfg::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        log_level: logger.level(),
        scope: cli.scope(),
    };

    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Set(cmd) => cmd.execute(&global),
        cli::Command::Unset(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::ShowPaths(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            match &e {
                _ if e.is_silent() => {}
                CliError::Library(lib_err) => logger.report(lib_err),
                other => logger.error(&other.to_string()),
            }
            std::process::exit(e.exit_code());
        }
    }
}
