//! Precedence-ordered layers of configuration files.
//!
//! A [`ConfigLayerStack`] holds one [`ConfigFile`] per layer, lowest
//! precedence first. Reads resolve against the highest layer that defines
//! a key; writes always go to the highest layer.
//!
//! Unlike field-by-field merging of structured configuration, values of a
//! multi-valued key are never combined across layers: the highest layer
//! that mentions the key owns all of its values.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use crate::entry::{ConfigEntry, ConfigLevel};
use crate::error::{Error, Result};
use crate::file::ConfigFile;
use crate::key::ConfigKey;

/// An ordered, never-empty collection of configuration layers.
///
/// # Examples
///
/// ```
/// use gitcfg::{ConfigFile, ConfigKey, ConfigLayerStack, ConfigLevel};
///
/// let global = ConfigFile::parse("[user]\n\tname = Global\n", None).unwrap();
/// let local = ConfigFile::parse("[user]\n\tname = Local\n", None).unwrap();
///
/// let mut stack = ConfigLayerStack::new(global.with_level(ConfigLevel::Global));
/// stack.push_layer(local, ConfigLevel::Local);
///
/// let name = ConfigKey::parse("user.name").unwrap();
/// assert_eq!(stack.lookup_one(&name).unwrap().value(), "Local");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLayerStack {
    layers: Vec<ConfigFile>,
}

impl ConfigLayerStack {
    /// Creates a stack with a single primary layer at the file's own level.
    #[must_use]
    pub fn new(primary: ConfigFile) -> Self {
        let level = primary.level();
        let mut stack = Self { layers: Vec::new() };
        stack.push_layer(primary, level);
        stack
    }

    /// Adds a layer at `level`.
    ///
    /// Layers stay sorted by level; a layer pushed at a level that is
    /// already present goes above the existing ones.
    pub fn push_layer(&mut self, file: ConfigFile, level: ConfigLevel) {
        let position = self.layers.partition_point(|layer| layer.level() <= level);
        let mut file = file;
        file.assign(level, position);
        self.layers.insert(position, file);
        self.renumber();
    }

    fn renumber(&mut self) {
        for (index, layer) in self.layers.iter_mut().enumerate() {
            let level = layer.level();
            layer.assign(level, index);
        }
    }

    /// All layers, lowest precedence first.
    #[must_use]
    pub fn layers(&self) -> &[ConfigFile] {
        &self.layers
    }

    /// The highest layer at `level`, if any.
    #[must_use]
    pub fn layer(&self, level: ConfigLevel) -> Option<&ConfigFile> {
        self.layers.iter().rev().find(|layer| layer.level() == level)
    }

    /// The highest-precedence layer, which receives all writes.
    #[must_use]
    pub fn top(&self) -> &ConfigFile {
        // Invariant: the stack is constructed with a primary layer and
        // layers are never removed.
        &self.layers[self.layers.len() - 1]
    }

    fn top_mut(&mut self) -> &mut ConfigFile {
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    /// The effective entry for `key`: the last occurrence in the highest
    /// layer that defines it.
    #[must_use]
    pub fn lookup_one(&self, key: &ConfigKey) -> Option<&ConfigEntry> {
        self.layers.iter().rev().find_map(|layer| layer.get_last(key))
    }

    /// Every entry for `key` in the highest layer that defines it, in file
    /// order. Lower layers do not contribute.
    pub fn lookup_all(&self, key: &ConfigKey) -> impl Iterator<Item = &ConfigEntry> + '_ {
        let owner = self.layers.iter().rev().find(|layer| layer.contains(key));
        let key = key.clone();
        owner.into_iter().flat_map(move |layer| layer.get(&key))
    }

    /// Sets `key` in the highest layer.
    pub fn write(&mut self, key: &ConfigKey, value: &str) {
        self.top_mut().set(key, value);
    }

    /// Appends a value for `key` in the highest layer.
    pub fn add(&mut self, key: &ConfigKey, value: &str) {
        self.top_mut().add(key, value);
    }

    /// Removes `key` from the highest layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the highest layer has no entry for
    /// `key`, even when a lower layer does.
    pub fn delete(&mut self, key: &ConfigKey) -> Result<usize> {
        self.top_mut().delete(key)
    }

    /// Replaces matching values of `key` in the highest layer.
    pub fn set_multivar(&mut self, key: &ConfigKey, pattern: &Regex, value: &str) -> usize {
        self.top_mut().set_multivar(key, pattern, value)
    }

    /// Removes matching values of `key` from the highest layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matched.
    pub fn delete_multivar(&mut self, key: &ConfigKey, pattern: &Regex) -> Result<usize> {
        self.top_mut().delete_multivar(key, pattern)
    }

    /// Effective entries in ascending layer order.
    ///
    /// For each key only the entries of its highest defining layer are
    /// yielded, so a multi-valued key shadowed by a higher layer disappears
    /// entirely from the lower one.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigEntry> + '_ {
        let owners = self.owning_layers();
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(index, layer)| layer.entries().iter().map(move |e| (index, e)))
            .filter(move |(index, entry)| owners.contains(&(*index, entry.key())))
            .map(|(_, entry)| entry)
    }

    fn owning_layers(&self) -> HashSet<(usize, &ConfigKey)> {
        let mut seen: HashSet<&ConfigKey> = HashSet::new();
        let mut owners = HashSet::new();
        for (index, layer) in self.layers.iter().enumerate().rev() {
            for entry in layer.entries() {
                let key = entry.key();
                if !seen.contains(key) {
                    owners.insert((index, key));
                }
            }
            seen.extend(layer.entries().iter().map(ConfigEntry::key));
        }
        owners
    }

    /// Persists the highest layer.
    ///
    /// With a `target`, the layer is written there and adopts it as its
    /// backing path. Without one it is written back to its own path.
    ///
    /// # Errors
    ///
    /// - [`Error::ReadOnly`] if no target is given and the highest layer has
    ///   no backing path
    /// - [`Error::Io`] if writing fails
    pub fn save(&mut self, target: Option<&Path>) -> Result<()> {
        let top = self.top_mut();
        match target {
            Some(path) => top.save_as(path),
            None if top.path().is_none() => Err(Error::ReadOnly {
                reason: format!("the {} layer has no backing file", top.level()),
            }),
            None => top.save(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn key(raw: &str) -> ConfigKey {
        ConfigKey::parse(raw).unwrap()
    }

    fn layer(text: &str) -> ConfigFile {
        ConfigFile::parse(text, None).unwrap()
    }

    fn three_levels() -> ConfigLayerStack {
        let mut stack =
            ConfigLayerStack::new(layer("[s]\na = 1\nonly = system\n").with_level(ConfigLevel::System));
        stack.push_layer(layer("[s]\na = 3\n"), ConfigLevel::Local);
        stack.push_layer(layer("[s]\na = 2\n"), ConfigLevel::Global);
        stack
    }

    #[test]
    fn test_layers_sorted_and_numbered() {
        let stack = three_levels();
        let levels: Vec<ConfigLevel> = stack.layers().iter().map(ConfigFile::level).collect();
        assert_eq!(
            levels,
            vec![ConfigLevel::System, ConfigLevel::Global, ConfigLevel::Local]
        );
        for (index, layer) in stack.layers().iter().enumerate() {
            for entry in layer.entries() {
                assert_eq!(entry.layer_index(), index);
                assert_eq!(entry.level(), layer.level());
            }
        }
    }

    #[test]
    fn test_highest_precedence_wins() {
        let stack = three_levels();
        let entry = stack.lookup_one(&key("s.a")).unwrap();
        assert_eq!(entry.value(), "3");
        assert_eq!(entry.level(), ConfigLevel::Local);
        assert_eq!(stack.lookup_one(&key("s.only")).unwrap().value(), "system");
        assert!(stack.lookup_one(&key("s.missing")).is_none());
    }

    #[test]
    fn test_lookup_all_uses_only_defining_layer() {
        let mut stack =
            ConfigLayerStack::new(layer("[s]\na = 1\n").with_level(ConfigLevel::System));
        stack.push_layer(layer("[s]\na = 2\na = 3\n"), ConfigLevel::Local);

        let values: Vec<&str> = stack.lookup_all(&key("s.a")).map(ConfigEntry::value).collect();
        assert_eq!(values, vec!["2", "3"]);
        assert_eq!(stack.lookup_all(&key("s.none")).count(), 0);
    }

    #[test]
    fn test_lookup_all_outlives_key() {
        let stack = ConfigLayerStack::new(layer("[s]\na = 1\na = 2\n"));
        let entries = {
            let name = key("s.a");
            stack.lookup_all(&name)
        };
        assert_eq!(entries.map(ConfigEntry::value).collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_same_level_pushes_go_on_top() {
        let mut stack = ConfigLayerStack::new(layer("[s]\na = first\n").with_level(ConfigLevel::Global));
        stack.push_layer(layer("[s]\na = second\n"), ConfigLevel::Global);
        assert_eq!(stack.lookup_one(&key("s.a")).unwrap().value(), "second");
        assert_eq!(
            stack.layer(ConfigLevel::Global).unwrap().entries()[0].value(),
            "second"
        );
    }

    #[test]
    fn test_writes_go_to_top_layer() {
        let mut stack = three_levels();
        stack.write(&key("s.new"), "x");
        stack.add(&key("s.a"), "4");

        assert!(stack.top().contains(&key("s.new")));
        assert!(!stack.layers()[0].contains(&key("s.new")));
        let values: Vec<&str> = stack.lookup_all(&key("s.a")).map(ConfigEntry::value).collect();
        assert_eq!(values, vec!["3", "4"]);
    }

    #[test]
    fn test_delete_only_touches_top_layer() {
        let mut stack = three_levels();
        assert_eq!(stack.delete(&key("s.a")).unwrap(), 1);
        // the global value now shows through
        assert_eq!(stack.lookup_one(&key("s.a")).unwrap().value(), "2");

        let err = stack.delete(&key("s.only")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_iter_shadows_lower_layers() {
        let mut stack =
            ConfigLayerStack::new(layer("[s]\na = 1\na = 1b\nb = low\n").with_level(ConfigLevel::System));
        stack.push_layer(layer("[s]\na = 2\nc = top\n"), ConfigLevel::Local);

        let pairs: Vec<(&str, &str)> = stack.iter().map(|e| (e.name(), e.value())).collect();
        assert_eq!(pairs, vec![("s.b", "low"), ("s.a", "2"), ("s.c", "top")]);

        // restartable
        assert_eq!(stack.iter().count(), 3);
    }

    #[test]
    fn test_multivar_targets_top() {
        let mut stack = ConfigLayerStack::new(layer("[r]\nf = a1\n").with_level(ConfigLevel::Global));
        stack.push_layer(layer("[r]\nf = b1\nf = b2\n"), ConfigLevel::Local);

        let pattern = Regex::new("^b").unwrap();
        assert_eq!(stack.set_multivar(&key("r.f"), &pattern, "z"), 2);
        assert_eq!(stack.delete_multivar(&key("r.f"), &Regex::new("z").unwrap()).unwrap(), 2);
        assert_eq!(stack.lookup_one(&key("r.f")).unwrap().value(), "a1");
    }

    #[test]
    fn test_save_pathless_top_is_read_only() {
        let mut stack = ConfigLayerStack::new(ConfigFile::new());
        stack.write(&key("a.b"), "c");
        let err = stack.save(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReadOnly);
    }

    #[test]
    fn test_save_to_target_adopts_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");

        let mut stack = ConfigLayerStack::new(ConfigFile::new());
        stack.write(&key("a.b"), "c");
        stack.save(Some(&path)).unwrap();
        assert_eq!(stack.top().path(), Some(path.as_path()));

        stack.write(&key("a.b"), "d");
        stack.save(None).unwrap();
        let reopened = ConfigFile::open_ondisk(&path).unwrap();
        assert_eq!(reopened.get_last(&key("a.b")).unwrap().value(), "d");
    }
}
