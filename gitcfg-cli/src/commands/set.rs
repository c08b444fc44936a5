//! Set command implementation.
//!
//! Writes go to a single file: the repository config by default, or the
//! file selected by a scope flag. The file is created if it does not exist.

use crate::commands::ValueType;
use crate::error::CliError;
use crate::utils::{open_for_write, save, GlobalOptions};
use clap::Args;
use gitcfg::ConfigKey;

/// Set the value of a key.
#[derive(Args)]
pub struct SetCommand {
    /// Key to write, e.g. `core.editor`
    #[arg(value_name = "NAME")]
    pub name: String,

    /// New value
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Check and normalize the value as this type
    #[arg(long = "type", value_enum, default_value = "string", ignore_case = true)]
    pub value_type: ValueType,

    /// Add another value instead of replacing the current one
    #[arg(long, conflicts_with = "replace_all")]
    pub add: bool,

    /// Replace every value matching this regex (adds one if none match)
    #[arg(long, value_name = "VALUE_REGEX")]
    pub replace_all: Option<String>,
}

impl SetCommand {
    /// Execute the set command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let key = ConfigKey::parse(&self.name)?;
        let value = self.value_type.normalize(key.as_str(), &self.value)?;

        let (mut store, target) = open_for_write(global)?;

        if self.add {
            store.add_string(key.as_str(), &value)?;
        } else if let Some(pattern) = &self.replace_all {
            let replaced = store.set_multivar(key.as_str(), pattern, &value)?;
            global
                .logger()
                .info(&format!("replaced {replaced} value(s) of {key}"));
        } else {
            store.set_string(key.as_str(), &value)?;
        }

        save(global, &mut store, &target)
    }
}
