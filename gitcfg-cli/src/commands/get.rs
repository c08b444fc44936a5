//! Get command implementation.
//!
//! Prints the effective value of a key, or every value of a multi-valued
//! key from its highest defining layer.

use crate::commands::ValueType;
use crate::error::CliError;
use crate::utils::{open_for_read, GlobalOptions};
use clap::Args;
use gitcfg::{ConfigKey, ConfigStore};
use std::io::Write;

/// Print the value of a key.
#[derive(Args)]
pub struct GetCommand {
    /// Key to read, e.g. `user.name` or `remote.origin.url`
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Interpret and print the value as this type
    #[arg(long = "type", value_enum, default_value = "string", ignore_case = true)]
    pub value_type: ValueType,

    /// Print every value of a multi-valued key
    #[arg(long)]
    pub all: bool,

    /// Value to print when the key is not set
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetCommand {
    /// Execute the get command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let key = ConfigKey::parse(&self.name)?;

        // A missing file is the same as a missing key here
        let store = match open_for_read(global) {
            Ok(store) => Some(store),
            Err(CliError::Library(e)) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        let values = match &store {
            Some(store) => self.lookup(store, &key)?,
            None => Vec::new(),
        };

        let values = if values.is_empty() {
            match &self.default {
                Some(default) => {
                    let home = home::home_dir();
                    let rendered = self
                        .value_type
                        .render(key.as_str(), Some(default), home.as_deref())
                        .map_err(|e| CliError::InvalidArguments(format!("--default: {e}")))?;
                    vec![rendered]
                }
                None => return Err(CliError::Missing),
            }
        } else {
            values
        };

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        for value in values {
            writeln!(handle, "{value}")?;
        }
        Ok(())
    }

    fn lookup(&self, store: &ConfigStore, key: &ConfigKey) -> Result<Vec<String>, CliError> {
        let entries: Vec<_> = if self.all {
            store.stack().lookup_all(key).collect()
        } else {
            store.stack().lookup_one(key).into_iter().collect()
        };

        entries
            .into_iter()
            .map(|entry| {
                self.value_type
                    .render(key.as_str(), entry.raw_value(), store.home())
                    .map_err(CliError::from)
            })
            .collect()
    }
}
