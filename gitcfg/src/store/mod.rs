//! The main configuration facade.
//!
//! [`ConfigStore`] owns a [`ConfigLayerStack`] and exposes string-keyed,
//! typed access to it. Keys are given in dotted form (`core.bare`,
//! `remote.origin.url`); reads resolve through the layers by precedence and
//! writes go to the highest layer.

mod builder;

use std::path::{Path, PathBuf};

pub use builder::ConfigStoreBuilder;

use crate::discovery::{find_global_config, find_system_config, find_xdg_config, GitEnvironment};
use crate::entry::{ConfigEntry, ConfigLevel};
use crate::error::{Error, Result};
use crate::file::ConfigFile;
use crate::key::ConfigKey;
use crate::stack::ConfigLayerStack;
use crate::value;

/// A layered git configuration.
///
/// # Examples
///
/// ```
/// use gitcfg::ConfigStore;
///
/// let mut store = ConfigStore::new();
/// store.set_int("pack.windowMemory", 64 * 1024).unwrap();
/// store.set_bool("core.bare", false).unwrap();
///
/// assert_eq!(store.get_int("pack.windowmemory").unwrap(), 65536);
/// assert!(!store.get_bool("core.bare").unwrap());
/// assert!(store.get_string("core.editor").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigStore {
    stack: ConfigLayerStack,
    home: Option<PathBuf>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub(crate) fn from_stack(stack: ConfigLayerStack, home: Option<PathBuf>) -> Self {
        Self { stack, home }
    }

    fn single(file: ConfigFile, home: Option<PathBuf>) -> Self {
        Self::from_stack(ConfigLayerStack::new(file), home)
    }

    /// Creates a store over a single empty in-memory layer.
    ///
    /// Saving it requires an explicit target path.
    #[must_use]
    pub fn new() -> Self {
        Self::single(ConfigFile::new(), home::home_dir())
    }

    /// Opens a single file as a local layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist and
    /// [`Error::Parse`] if it is malformed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = ConfigFile::open_ondisk(path)?.with_level(ConfigLevel::Local);
        Ok(Self::single(file, home::home_dir()))
    }

    /// Opens every configuration layer git would read.
    ///
    /// Layers are system, XDG, global, the config of the repository
    /// containing `repository` (when given) and environment overrides.
    /// Missing layers are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no layer exists at all, and
    /// [`Error::Parse`] if an existing file is malformed.
    pub fn open_default(env: &GitEnvironment, repository: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder(env.clone());
        if let Some(start) = repository {
            builder = builder.with_repository(start);
        }
        builder.build()
    }

    /// Starts building a store with control over which layers are read.
    #[must_use]
    pub fn builder(env: GitEnvironment) -> ConfigStoreBuilder {
        ConfigStoreBuilder::new(env)
    }

    /// Opens only the system configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] ("system config file not found") if there
    /// is no system config.
    pub fn get_system_config(env: &GitEnvironment) -> Result<Self> {
        let path = find_system_config(env)?;
        Self::open_located(env, &path, ConfigLevel::System, "system")
    }

    /// Opens only the global configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] ("global config file not found") if there
    /// is no global config.
    pub fn get_global_config(env: &GitEnvironment) -> Result<Self> {
        let path = find_global_config(env)?;
        Self::open_located(env, &path, ConfigLevel::Global, "global")
    }

    /// Opens only the XDG configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there is no XDG config.
    pub fn get_xdg_config(env: &GitEnvironment) -> Result<Self> {
        let path = find_xdg_config(env)?;
        Self::open_located(env, &path, ConfigLevel::Xdg, "xdg")
    }

    fn open_located(
        env: &GitEnvironment,
        path: &Path,
        level: ConfigLevel,
        scope: &str,
    ) -> Result<Self> {
        let file = ConfigFile::open_ondisk(path).map_err(|e| {
            if e.is_not_found() {
                Error::config_not_found(scope)
            } else {
                e
            }
        })?;
        Ok(Self::single(
            file.with_level(level),
            env.home().map(Path::to_path_buf),
        ))
    }

    /// The underlying layers.
    #[must_use]
    pub fn stack(&self) -> &ConfigLayerStack {
        &self.stack
    }

    /// Mutable access to the underlying layers.
    pub fn stack_mut(&mut self) -> &mut ConfigLayerStack {
        &mut self.stack
    }

    /// The home directory used to expand `~` in path values.
    #[must_use]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Returns this store with a different home directory for path values.
    #[must_use]
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// The effective entry for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed name and
    /// [`Error::NotFound`] if no layer defines it.
    pub fn get_entry(&self, name: &str) -> Result<&ConfigEntry> {
        let key = ConfigKey::parse(name)?;
        self.stack
            .lookup_one(&key)
            .ok_or_else(|| Error::key_not_found(key.as_str()))
    }

    /// The effective value of `name`. An implicit value reads as `""`.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::get_entry`].
    pub fn get_string(&self, name: &str) -> Result<&str> {
        self.get_entry(name).map(ConfigEntry::value)
    }

    /// The effective value of `name` as a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is not a git boolean.
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        let entry = self.get_entry(name)?;
        value::parse_bool(entry.name(), entry.raw_value())
    }

    /// The effective value of `name` as an integer, honouring `k`/`m`/`g`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is not an integer.
    pub fn get_int(&self, name: &str) -> Result<i64> {
        let entry = self.get_entry(name)?;
        value::parse_int(entry.name(), entry.value())
    }

    /// Like [`ConfigStore::get_int`] but range-checked to `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value is not an integer or
    /// does not fit.
    pub fn get_i32(&self, name: &str) -> Result<i32> {
        let entry = self.get_entry(name)?;
        value::parse_i32(entry.name(), entry.value())
    }

    /// The effective value of `name` as a path with `~` expanded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for an implicit value or an
    /// unexpandable `~` path.
    pub fn get_path(&self, name: &str) -> Result<PathBuf> {
        let entry = self.get_entry(name)?;
        let Some(raw) = entry.raw_value() else {
            return Err(Error::TypeMismatch {
                key: entry.name().to_string(),
                value: String::new(),
                expected: "path",
            });
        };
        value::parse_path(entry.name(), raw, self.home())
    }

    /// Every value of a multi-valued key from its highest defining layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no layer defines it.
    pub fn get_all(&self, name: &str) -> Result<Vec<&str>> {
        let key = ConfigKey::parse(name)?;
        let values: Vec<&str> = self.stack.lookup_all(&key).map(ConfigEntry::value).collect();
        if values.is_empty() {
            return Err(Error::key_not_found(key.as_str()));
        }
        Ok(values)
    }

    /// Sets `name` in the highest layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed name.
    pub fn set_string(&mut self, name: &str, value: &str) -> Result<()> {
        let key = ConfigKey::parse(name)?;
        self.stack.write(&key, value);
        Ok(())
    }

    /// Sets `name` to `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed name.
    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<()> {
        self.set_string(name, value::format_bool(value))
    }

    /// Sets `name` to a decimal integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed name.
    pub fn set_int(&mut self, name: &str, value: i64) -> Result<()> {
        self.set_string(name, &value.to_string())
    }

    /// Adds another value for a multi-valued key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for a malformed name.
    pub fn add_string(&mut self, name: &str, value: &str) -> Result<()> {
        let key = ConfigKey::parse(name)?;
        self.stack.add(&key, value);
        Ok(())
    }

    /// Replaces every value of `name` matching the regex `pattern`, adding
    /// a new value if none match. Returns the number replaced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] or [`Error::InvalidPattern`].
    pub fn set_multivar(&mut self, name: &str, pattern: &str, value: &str) -> Result<usize> {
        let key = ConfigKey::parse(name)?;
        let pattern = Error::compile_pattern(pattern)?;
        Ok(self.stack.set_multivar(&key, &pattern, value))
    }

    /// Removes every value of `name` matching the regex `pattern` from the
    /// highest layer. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matched.
    pub fn delete_multivar(&mut self, name: &str, pattern: &str) -> Result<usize> {
        let key = ConfigKey::parse(name)?;
        let pattern = Error::compile_pattern(pattern)?;
        self.stack.delete_multivar(&key, &pattern)
    }

    /// Removes every value of `name` from the highest layer. Returns the
    /// number removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the highest layer has no value for it.
    pub fn delete(&mut self, name: &str) -> Result<usize> {
        let key = ConfigKey::parse(name)?;
        self.stack.delete(&key)
    }

    /// Effective `(name, value)` pairs, lowest layer first. Each call
    /// starts a fresh scan.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.stack.iter().map(|e| (e.name(), e.value()))
    }

    /// Effective entries with their provenance, as for [`ConfigStore::iter`].
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> + '_ {
        self.stack.iter()
    }

    /// Persists the highest layer, to `path` if given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOnly`] if no path is given and the highest layer
    /// is in memory only, or [`Error::Io`] if writing fails.
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        self.stack.save(path)
    }
}
