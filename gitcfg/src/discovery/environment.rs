//! Snapshot of the process environment that git configuration depends on.
//!
//! Discovery never reads the OS directly. Everything it needs (variables,
//! home directory, installation defaults) is captured once in a
//! [`GitEnvironment`], which tests build by hand.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::entry::ConfigLevel;
use crate::error::{Error, Result};
use crate::file::ConfigFile;
use crate::key::ConfigKey;

/// Number of `GIT_CONFIG_KEY_<n>`/`GIT_CONFIG_VALUE_<n>` pairs.
pub const CONFIG_COUNT_VAR: &str = "GIT_CONFIG_COUNT";

/// An immutable view of the environment used for config discovery.
///
/// # Examples
///
/// ```
/// use gitcfg::GitEnvironment;
/// use std::path::Path;
///
/// let env = GitEnvironment::empty()
///     .with_home("/home/dev")
///     .with_var("GIT_CONFIG_NOSYSTEM", "1");
///
/// assert_eq!(env.home(), Some(Path::new("/home/dev")));
/// assert_eq!(env.var("GIT_CONFIG_NOSYSTEM"), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitEnvironment {
    vars: BTreeMap<String, String>,
    home: Option<PathBuf>,
    system_defaults: Vec<PathBuf>,
}

impl GitEnvironment {
    /// Captures the current process environment.
    ///
    /// Variables that are not valid unicode are skipped.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
            home: home::home_dir(),
            system_defaults: platform_system_defaults(),
        }
    }

    /// An environment with no variables, no home directory and no
    /// installation defaults.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets a variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Sets the home directory.
    #[must_use]
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Replaces the installation's default system config candidates.
    #[must_use]
    pub fn with_system_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.system_defaults = vec![path.into()];
        self
    }

    /// Looks up a variable. Unset and empty variables both read as `None`.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The home directory, if known.
    #[must_use]
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Default system config locations for this installation, in order.
    #[must_use]
    pub fn system_defaults(&self) -> &[PathBuf] {
        &self.system_defaults
    }

    /// Interprets a variable as a git boolean; unset reads as `false`.
    pub(crate) fn flag(&self, name: &str) -> Result<bool> {
        match self.var(name) {
            None => Ok(false),
            Some(raw) => crate::value::parse_bool(name, Some(raw)).map_err(|_| {
                Error::InvalidEnvironment {
                    variable: name.to_string(),
                    message: format!("'{raw}' is not a boolean"),
                }
            }),
        }
    }
}

fn platform_system_defaults() -> Vec<PathBuf> {
    let mut defaults = Vec::new();
    if cfg!(windows) {
        if let Some(program_files) = env::var_os("PROGRAMFILES") {
            defaults.push(
                PathBuf::from(program_files)
                    .join("Git")
                    .join("etc")
                    .join("gitconfig"),
            );
        }
    } else {
        defaults.push(PathBuf::from("/etc/gitconfig"));
    }
    defaults
}

/// Builds the in-memory override layer from `GIT_CONFIG_COUNT`,
/// `GIT_CONFIG_KEY_<n>` and `GIT_CONFIG_VALUE_<n>`.
///
/// Returns `None` when no overrides are configured.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvironment`] if the count is not a number, a
/// key or value variable is missing, or a key is invalid.
///
/// # Examples
///
/// ```
/// use gitcfg::{environment_overrides, ConfigKey, GitEnvironment};
///
/// let env = GitEnvironment::empty()
///     .with_var("GIT_CONFIG_COUNT", "1")
///     .with_var("GIT_CONFIG_KEY_0", "core.pager")
///     .with_var("GIT_CONFIG_VALUE_0", "cat");
///
/// let layer = environment_overrides(&env).unwrap().unwrap();
/// let key = ConfigKey::parse("core.pager").unwrap();
/// assert_eq!(layer.get_last(&key).unwrap().value(), "cat");
/// ```
pub fn environment_overrides(env: &GitEnvironment) -> Result<Option<ConfigFile>> {
    let Some(raw_count) = env.var(CONFIG_COUNT_VAR) else {
        return Ok(None);
    };
    let count: usize = raw_count.trim().parse().map_err(|_| Error::InvalidEnvironment {
        variable: CONFIG_COUNT_VAR.to_string(),
        message: format!("'{raw_count}' is not a count"),
    })?;
    if count == 0 {
        return Ok(None);
    }

    let mut layer = ConfigFile::new().with_level(ConfigLevel::Override);
    for n in 0..count {
        let key_var = format!("GIT_CONFIG_KEY_{n}");
        let value_var = format!("GIT_CONFIG_VALUE_{n}");

        let raw_key = env.var(&key_var).ok_or_else(|| missing(&key_var))?;
        // an empty value is legitimate, so read the map directly
        let value = env.vars.get(&value_var).ok_or_else(|| missing(&value_var))?;

        let key = ConfigKey::parse(raw_key).map_err(|e| Error::InvalidEnvironment {
            variable: key_var.clone(),
            message: e.to_string(),
        })?;
        layer.add(&key, value);
    }

    log::debug!("applied {count} config overrides from the environment");
    Ok(Some(layer))
}

fn missing(variable: &str) -> Error {
    Error::InvalidEnvironment {
        variable: variable.to_string(),
        message: "variable is not set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn overrides(pairs: &[(&str, &str)]) -> Result<Option<ConfigFile>> {
        let env = pairs
            .iter()
            .fold(GitEnvironment::empty(), |env, (k, v)| env.with_var(*k, *v));
        environment_overrides(&env)
    }

    #[test]
    fn test_empty_environment() {
        let env = GitEnvironment::empty();
        assert!(env.home().is_none());
        assert!(env.system_defaults().is_empty());
        assert!(env.var("HOME").is_none());
    }

    #[test]
    fn test_empty_var_reads_as_unset() {
        let env = GitEnvironment::empty().with_var("XDG_CONFIG_HOME", "");
        assert!(env.var("XDG_CONFIG_HOME").is_none());
    }

    #[test]
    fn test_flag_parsing() {
        let env = GitEnvironment::empty()
            .with_var("ON", "yes")
            .with_var("OFF", "0")
            .with_var("BAD", "perhaps");
        assert!(env.flag("ON").unwrap());
        assert!(!env.flag("OFF").unwrap());
        assert!(!env.flag("UNSET").unwrap());
        assert_eq!(env.flag("BAD").unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_with_system_config_replaces_defaults() {
        let env = GitEnvironment::empty()
            .with_system_config("/opt/a")
            .with_system_config("/opt/b");
        assert_eq!(env.system_defaults(), &[PathBuf::from("/opt/b")]);
    }

    #[test]
    fn test_no_overrides() {
        assert!(overrides(&[]).unwrap().is_none());
        assert!(overrides(&[("GIT_CONFIG_COUNT", "0")]).unwrap().is_none());
    }

    #[test]
    fn test_overrides_in_order() {
        let layer = overrides(&[
            ("GIT_CONFIG_COUNT", "3"),
            ("GIT_CONFIG_KEY_0", "Remote.origin.fetch"),
            ("GIT_CONFIG_VALUE_0", "a"),
            ("GIT_CONFIG_KEY_1", "remote.origin.fetch"),
            ("GIT_CONFIG_VALUE_1", "b"),
            ("GIT_CONFIG_KEY_2", "core.editor"),
            ("GIT_CONFIG_VALUE_2", ""),
        ])
        .unwrap()
        .unwrap();

        assert_eq!(layer.level(), ConfigLevel::Override);
        assert!(layer.path().is_none());
        let fetch = ConfigKey::parse("remote.origin.fetch").unwrap();
        let values: Vec<&str> = layer.get(&fetch).map(|e| e.value()).collect();
        assert_eq!(values, vec!["a", "b"]);
        let editor = ConfigKey::parse("core.editor").unwrap();
        assert_eq!(layer.get_last(&editor).unwrap().raw_value(), Some(""));
    }

    #[test]
    fn test_malformed_overrides() {
        let cases: &[&[(&str, &str)]] = &[
            &[("GIT_CONFIG_COUNT", "many")],
            &[("GIT_CONFIG_COUNT", "1"), ("GIT_CONFIG_VALUE_0", "x")],
            &[("GIT_CONFIG_COUNT", "1"), ("GIT_CONFIG_KEY_0", "a.b")],
            &[
                ("GIT_CONFIG_COUNT", "1"),
                ("GIT_CONFIG_KEY_0", "nodot"),
                ("GIT_CONFIG_VALUE_0", "x"),
            ],
        ];
        for pairs in cases {
            let err = overrides(pairs).unwrap_err();
            assert!(
                matches!(err, Error::InvalidEnvironment { .. }),
                "expected InvalidEnvironment for {pairs:?}, got {err:?}"
            );
        }
    }
}
