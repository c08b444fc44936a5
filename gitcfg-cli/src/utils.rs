//! Utility functions for CLI operations.
//!
//! This module provides the helpers shared across commands: resolving which
//! configuration the scope flags select, opening it for reading or writing,
//! and formatting paths for display.

use crate::error::CliError;
use gitcfg::{
    find_global_config, find_repository_config, find_system_config, ConfigStore, GitEnvironment,
    LogLevel, Logger,
};
use std::env;
use std::path::{Path, PathBuf};

/// Which configuration a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Reads see every layer; writes go to the repository config.
    Default,
    /// The system-wide file.
    System,
    /// The per-user file.
    Global,
    /// The config of the repository containing the working directory.
    Local,
    /// An explicit file.
    File(PathBuf),
}

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Verbosity of diagnostics on stderr.
    pub log_level: LogLevel,

    /// Configuration selected by the scope flags.
    pub scope: Scope,
}

impl GlobalOptions {
    /// A logger at the configured verbosity.
    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }
}

/// Directory that repository discovery starts from.
pub fn working_dir() -> Result<PathBuf, CliError> {
    Ok(env::current_dir()?)
}

/// Open the configuration selected by `global` for reading.
///
/// Without a scope flag every layer git would read is loaded, rooted at the
/// current directory.
pub fn open_for_read(global: &GlobalOptions) -> Result<ConfigStore, CliError> {
    let env = GitEnvironment::from_process();
    let logger = global.logger();

    let store = match &global.scope {
        Scope::Default => ConfigStore::open_default(&env, Some(&working_dir()?))?,
        Scope::System => ConfigStore::get_system_config(&env)?,
        Scope::Global => ConfigStore::get_global_config(&env)?,
        Scope::Local => ConfigStore::open(find_repository_config(&working_dir()?)?)?,
        Scope::File(path) => ConfigStore::open(path)?,
    };

    for layer in store.stack().layers() {
        let origin = layer
            .path()
            .map_or_else(|| "(environment)".to_string(), shorten_path);
        logger.info(&format!("read {} layer {origin}", layer.level()));
    }
    Ok(store)
}

/// The file that writes in `scope` go to.
///
/// Like git, the default scope writes to the repository config.
pub fn write_target(scope: &Scope) -> Result<PathBuf, CliError> {
    let env = GitEnvironment::from_process();
    let target = match scope {
        Scope::Default | Scope::Local => find_repository_config(&working_dir()?)?,
        Scope::System => find_system_config(&env)?,
        Scope::Global => match find_global_config(&env) {
            Ok(path) => path,
            // ~/.gitconfig is created on first write
            Err(e) => env.home().map(|home| home.join(".gitconfig")).ok_or(e)?,
        },
        Scope::File(path) => path.clone(),
    };
    Ok(target)
}

/// Open the single file writes in `global.scope` go to. A missing file
/// starts out empty.
///
/// Returns the store and the path to save it to.
pub fn open_for_write(global: &GlobalOptions) -> Result<(ConfigStore, PathBuf), CliError> {
    let target = write_target(&global.scope)?;
    let store = match ConfigStore::open(&target) {
        Ok(store) => store,
        Err(e) if e.is_not_found() => {
            global
                .logger()
                .info(&format!("creating {}", shorten_path(&target)));
            ConfigStore::new()
        }
        Err(e) => return Err(e.into()),
    };
    Ok((store, target))
}

/// Save `store` to `target`.
pub fn save(global: &GlobalOptions, store: &mut ConfigStore, target: &Path) -> Result<(), CliError> {
    store.save(Some(target))?;
    global
        .logger()
        .info(&format!("wrote {}", shorten_path(target)));
    Ok(())
}

/// Shorten a path for display by replacing home directory with ~.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
