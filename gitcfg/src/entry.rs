//! Configuration entries and the precedence levels they come from.

use std::fmt;

use serde::Serialize;

use crate::key::ConfigKey;

/// Precedence level of a configuration layer.
///
/// Levels are ordered from lowest to highest precedence; a value defined at
/// a higher level shadows the same key at every lower level.
///
/// # Examples
///
/// ```
/// use gitcfg::ConfigLevel;
///
/// assert!(ConfigLevel::System < ConfigLevel::Global);
/// assert!(ConfigLevel::Global < ConfigLevel::Local);
/// assert!(ConfigLevel::Local < ConfigLevel::Override);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigLevel {
    /// Installation-wide file, e.g. `/etc/gitconfig`.
    System,
    /// `$XDG_CONFIG_HOME/git/config`.
    Xdg,
    /// The user's `~/.gitconfig`.
    Global,
    /// A repository's `.git/config`, or any explicitly opened file.
    Local,
    /// Environment or programmatic overrides.
    Override,
}

impl ConfigLevel {
    /// All levels in ascending precedence.
    pub const ALL: [Self; 5] = [
        Self::System,
        Self::Xdg,
        Self::Global,
        Self::Local,
        Self::Override,
    ];
}

impl fmt::Display for ConfigLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Xdg => write!(f, "xdg"),
            Self::Global => write!(f, "global"),
            Self::Local => write!(f, "local"),
            Self::Override => write!(f, "override"),
        }
    }
}

/// A single key/value pair together with where it came from.
///
/// A `None` value is an implicit, valueless key (`[core]\n\tbare`), which
/// reads as boolean true and as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigEntry {
    key: ConfigKey,
    value: Option<String>,
    level: ConfigLevel,
    layer_index: usize,
}

impl ConfigEntry {
    pub(crate) fn new(
        key: ConfigKey,
        value: Option<String>,
        level: ConfigLevel,
        layer_index: usize,
    ) -> Self {
        Self {
            key,
            value,
            level,
            layer_index,
        }
    }

    /// The normalized key.
    #[must_use]
    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// The canonical dotted name, e.g. `remote.origin.url`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.key.as_str()
    }

    /// The raw value; empty for implicit keys.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// The raw value, `None` for implicit keys.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the key was written without `=`.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        self.value.is_none()
    }

    /// The level of the file this entry was read from.
    #[must_use]
    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    /// Index of the owning layer within its stack (0 = lowest precedence).
    #[must_use]
    pub fn layer_index(&self) -> usize {
        self.layer_index
    }

    pub(crate) fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub(crate) fn relocate(&mut self, level: ConfigLevel, layer_index: usize) {
        self.level = level;
        self.layer_index = layer_index;
    }
}
