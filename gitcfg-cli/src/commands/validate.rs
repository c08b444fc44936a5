//! Command to validate a git config file.

use crate::error::CliError;
use crate::utils::{shorten_path, GlobalOptions};
use clap::Args;
use gitcfg::ConfigFile;
use std::path::PathBuf;

/// Check that a config file parses.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let file = ConfigFile::open_ondisk(&self.config_path)?;

        if !global.logger().enabled(gitcfg::LogLevel::Normal) {
            return Ok(());
        }
        println!(
            "{}: ok ({} entries in {} sections)",
            shorten_path(&self.config_path),
            file.len(),
            file.sections().len()
        );
        Ok(())
    }
}
