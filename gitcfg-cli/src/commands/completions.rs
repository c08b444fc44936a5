//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use gitcfg::LogLevel;
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "gitcfg";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if global.logger().enabled(LogLevel::Normal) {
            eprintln!("# {} completions for {BIN_NAME}; install with:", self.shell);
            print_install_hint(self.shell);
            eprintln!();
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    match shell {
        Shell::Bash => {
            eprintln!("#   gitcfg completions bash > ~/.local/share/bash-completion/completions/gitcfg");
        }
        Shell::Zsh => {
            eprintln!("#   gitcfg completions zsh > ~/.zsh/completions/_gitcfg");
            eprintln!("# with ~/.zsh/completions in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   gitcfg completions fish > ~/.config/fish/completions/gitcfg.fish");
        }
        Shell::PowerShell => {
            eprintln!("#   gitcfg completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }
}
