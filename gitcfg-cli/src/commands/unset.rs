//! Unset command implementation.

use crate::error::CliError;
use crate::utils::{open_for_write, save, GlobalOptions};
use clap::Args;
use gitcfg::ConfigKey;

/// Remove a key.
#[derive(Args)]
pub struct UnsetCommand {
    /// Key to remove
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Only remove values matching this regex
    #[arg(value_name = "VALUE_REGEX")]
    pub value_regex: Option<String>,
}

impl UnsetCommand {
    /// Execute the unset command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let key = ConfigKey::parse(&self.name)?;
        let (mut store, target) = open_for_write(global)?;

        let removed = match &self.value_regex {
            Some(pattern) => store.delete_multivar(key.as_str(), pattern)?,
            None => store.delete(key.as_str())?,
        };
        global
            .logger()
            .info(&format!("removed {removed} value(s) of {key}"));

        save(global, &mut store, &target)
    }
}
