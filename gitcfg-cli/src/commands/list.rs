//! List command implementation.
//!
//! This module implements the `list` command, which prints the effective
//! settings as `name=value` lines or as JSON.

use crate::error::CliError;
use crate::utils::{open_for_read, GlobalOptions};
use clap::Args;
use gitcfg::{ConfigEntry, ConfigLevel, ConfigStore};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// List effective settings.
#[derive(Args)]
pub struct ListCommand {
    /// Prefix each setting with the file it comes from
    #[arg(long)]
    pub show_origin: bool,

    /// Output JSON instead of name=value lines
    #[arg(long)]
    pub json: bool,
}

/// One setting in JSON output.
#[derive(Serialize)]
struct ListItem<'a> {
    name: &'a str,
    value: Option<&'a str>,
    level: ConfigLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let store = open_for_read(global)?;

        if self.json {
            format_as_json(&store, self.show_origin)
        } else {
            format_as_lines(&store, self.show_origin)
        }
    }
}

fn origin_of<'a>(store: &'a ConfigStore, entry: &ConfigEntry) -> Option<&'a Path> {
    store
        .stack()
        .layers()
        .get(entry.layer_index())
        .and_then(|layer| layer.path())
}

/// Format settings the way `git config --list` does.
fn format_as_lines(store: &ConfigStore, show_origin: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for entry in store.entries() {
        if show_origin {
            match origin_of(store, entry) {
                Some(path) => write!(handle, "file:{}\t", path.display())?,
                None => write!(handle, "command line:\t")?,
            }
        }
        match entry.raw_value() {
            Some(value) => writeln!(handle, "{}={value}", entry.name())?,
            None => writeln!(handle, "{}", entry.name())?,
        }
    }

    Ok(())
}

/// Format settings as a JSON array.
fn format_as_json(store: &ConfigStore, show_origin: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let items: Vec<ListItem<'_>> = store
        .entries()
        .map(|entry| ListItem {
            name: entry.name(),
            value: entry.raw_value(),
            level: entry.level(),
            origin: show_origin
                .then(|| origin_of(store, entry).map(|p| p.display().to_string()))
                .flatten(),
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &items)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}
