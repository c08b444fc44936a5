//! Assembling a [`ConfigStore`] from the discovered layers.

use std::path::{Path, PathBuf};

use crate::discovery::{
    environment_overrides, find_global_config, find_repository_config, find_system_config,
    find_xdg_config, GitEnvironment,
};
use crate::entry::ConfigLevel;
use crate::error::{Error, Result};
use crate::file::ConfigFile;
use crate::stack::ConfigLayerStack;
use crate::store::ConfigStore;

/// Builder for a layered [`ConfigStore`].
///
/// By default every well-known layer is considered. Layers whose files do
/// not exist are skipped; a file that exists but cannot be parsed fails the
/// build.
///
/// # Examples
///
/// ```no_run
/// use gitcfg::{ConfigStore, GitEnvironment};
///
/// let store = ConfigStore::builder(GitEnvironment::from_process())
///     .with_repository(".")
///     .skip_system()
///     .build()
///     .unwrap();
/// println!("{} layers", store.stack().layers().len());
/// ```
#[derive(Debug)]
pub struct ConfigStoreBuilder {
    env: GitEnvironment,
    repository: Option<PathBuf>,
    files: Vec<(PathBuf, ConfigLevel)>,
    skip_system: bool,
    skip_xdg: bool,
    skip_global: bool,
    skip_env_overrides: bool,
}

impl ConfigStoreBuilder {
    pub(crate) fn new(env: GitEnvironment) -> Self {
        Self {
            env,
            repository: None,
            files: Vec::new(),
            skip_system: false,
            skip_xdg: false,
            skip_global: false,
            skip_env_overrides: false,
        }
    }

    /// Includes the config of the repository containing `start`, if any.
    #[must_use]
    pub fn with_repository(mut self, start: impl Into<PathBuf>) -> Self {
        self.repository = Some(start.into());
        self
    }

    /// Adds an explicit file at `level`. Unlike discovered layers it must
    /// exist.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        self.files.push((path.into(), level));
        self
    }

    /// Leaves out the system layer.
    #[must_use]
    pub const fn skip_system(mut self) -> Self {
        self.skip_system = true;
        self
    }

    /// Leaves out the XDG layer.
    #[must_use]
    pub const fn skip_xdg(mut self) -> Self {
        self.skip_xdg = true;
        self
    }

    /// Leaves out the global layer.
    #[must_use]
    pub const fn skip_global(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Ignores `GIT_CONFIG_COUNT` overrides.
    #[must_use]
    pub const fn skip_env_overrides(mut self) -> Self {
        self.skip_env_overrides = true;
        self
    }

    /// Loads every selected layer and builds the store.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no layer could be loaded, or an explicit
    ///   file does not exist
    /// - [`Error::Parse`] if any loaded file is malformed
    /// - [`Error::InvalidEnvironment`] for malformed override variables
    pub fn build(self) -> Result<ConfigStore> {
        let mut layers: Vec<ConfigFile> = Vec::new();

        if !self.skip_system {
            layers.extend(load_discovered(
                find_system_config(&self.env),
                ConfigLevel::System,
            )?);
        }

        // an explicit global file replaces both per-user locations
        if !self.skip_xdg && self.env.var("GIT_CONFIG_GLOBAL").is_none() {
            layers.extend(load_discovered(find_xdg_config(&self.env), ConfigLevel::Xdg)?);
        }

        if !self.skip_global {
            layers.extend(load_discovered(
                find_global_config(&self.env),
                ConfigLevel::Global,
            )?);
        }

        if let Some(start) = &self.repository {
            layers.extend(load_discovered(
                find_repository_config(start),
                ConfigLevel::Local,
            )?);
        }

        for (path, level) in &self.files {
            layers.push(ConfigFile::open_ondisk(path)?.with_level(*level));
        }

        if !self.skip_env_overrides {
            layers.extend(environment_overrides(&self.env)?);
        }

        let mut layers = layers.into_iter();
        let Some(primary) = layers.next() else {
            return Err(Error::NotFound {
                resource: "git configuration".to_string(),
            });
        };

        let mut stack = ConfigLayerStack::new(primary);
        for layer in layers {
            let level = layer.level();
            stack.push_layer(layer, level);
        }

        log::debug!("assembled {} config layers", stack.layers().len());
        Ok(ConfigStore::from_stack(
            stack,
            self.env.home().map(Path::to_path_buf),
        ))
    }
}

/// Opens a discovered layer, treating a missing file as an absent layer.
fn load_discovered(located: Result<PathBuf>, level: ConfigLevel) -> Result<Option<ConfigFile>> {
    let path = match located {
        Ok(path) => path,
        Err(e) if e.is_not_found() => {
            log::debug!("skipping {level} layer: {e}");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    match ConfigFile::open_ondisk(&path) {
        Ok(file) => Ok(Some(file.with_level(level))),
        Err(e) if e.is_not_found() => {
            log::debug!("skipping {level} layer: {e}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
