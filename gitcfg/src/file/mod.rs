//! A single git config file.
//!
//! [`ConfigFile`] owns the parsed entries of one file, in file order, along
//! with the section headers it declares. Mutations follow `git config`
//! semantics: `set` updates the last occurrence of a key, `add` appends,
//! and new keys are placed next to the existing keys of their section.
//!
//! # Examples
//!
//! ```
//! use gitcfg::{ConfigFile, ConfigKey};
//!
//! let mut file = ConfigFile::parse("[user]\n\tname = Ada\n", None).unwrap();
//! let email = ConfigKey::parse("user.email").unwrap();
//! file.set(&email, "ada@example.com");
//!
//! assert_eq!(
//!     file.to_config_string(),
//!     "[user]\n\tname = Ada\n\temail = ada@example.com\n"
//! );
//! ```

mod parser;
mod writer;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::entry::{ConfigEntry, ConfigLevel};
use crate::error::{Error, Result};
use crate::key::{ConfigKey, SectionHeader};

/// One configuration file, on disk or in memory.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    level: ConfigLevel,
    layer_index: usize,
    sections: Vec<SectionHeader>,
    entries: Vec<ConfigEntry>,
    dirty: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFile {
    /// Creates an empty in-memory file with no backing path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: None,
            level: ConfigLevel::Local,
            layer_index: 0,
            sections: Vec::new(),
            entries: Vec::new(),
            dirty: false,
        }
    }

    /// Reads and parses the file at `path`.
    ///
    /// The file handle is held only for the duration of the read.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the file does not exist
    /// - [`Error::Io`] if it cannot be read
    /// - [`Error::Parse`] if its syntax is malformed or it is not valid
    ///   UTF-8; no partial result is returned
    pub fn open_ondisk(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = {
            let mut handle = fs::File::open(path).map_err(|e| Error::from_io(path, e))?;
            let mut bytes = Vec::new();
            handle
                .read_to_end(&mut bytes)
                .map_err(|e| Error::from_io(path, e))?;
            bytes
        };
        let text = decode(bytes, path)?;

        let file = Self::parse(&text, Some(path))?;
        log::debug!(
            "loaded {} entries from {}",
            file.entries.len(),
            path.display()
        );
        Ok(file)
    }

    /// Parses config text. `path` becomes the backing path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] with line and column on malformed syntax.
    pub fn parse(text: &str, path: Option<&Path>) -> Result<Self> {
        let parsed = parser::parse(text, path)?;
        let mut file = Self::new();
        file.path = path.map(Path::to_path_buf);
        file.sections = parsed.sections;
        file.entries = parsed
            .entries
            .into_iter()
            .map(|(key, value)| ConfigEntry::new(key, value, file.level, file.layer_index))
            .collect();
        Ok(file)
    }

    /// Returns this file tagged with `level`.
    #[must_use]
    pub fn with_level(mut self, level: ConfigLevel) -> Self {
        self.assign(level, self.layer_index);
        self
    }

    pub(crate) fn assign(&mut self, level: ConfigLevel, layer_index: usize) {
        self.level = level;
        self.layer_index = layer_index;
        for entry in &mut self.entries {
            entry.relocate(level, layer_index);
        }
    }

    /// The backing path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The precedence level of this file.
    #[must_use]
    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    /// Whether there are unsaved modifications.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Section headers in order of first appearance.
    #[must_use]
    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for `key`, in file order.
    pub fn get(&self, key: &ConfigKey) -> impl Iterator<Item = &ConfigEntry> + '_ {
        let key = key.clone();
        self.entries.iter().filter(move |e| *e.key() == key)
    }

    /// The last entry for `key`, which is the one single-valued reads use.
    #[must_use]
    pub fn get_last(&self, key: &ConfigKey) -> Option<&ConfigEntry> {
        self.entries.iter().rev().find(|e| e.key() == key)
    }

    /// Whether any entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }

    /// Sets `key` to `value`.
    ///
    /// Replaces the value of the last existing entry for `key`; otherwise
    /// adds a new entry as [`ConfigFile::add`] does.
    pub fn set(&mut self, key: &ConfigKey, value: &str) {
        match self.entries.iter_mut().rev().find(|e| e.key() == key) {
            Some(entry) => entry.set_value(Some(value.to_string())),
            None => self.insert(key, Some(value.to_string())),
        }
        self.dirty = true;
    }

    /// Appends a new entry for `key`, keeping any existing ones.
    ///
    /// The entry goes directly after the last entry of the same section.
    /// If the section has no entries it is appended under the existing
    /// header, and if the header does not exist a new section is opened at
    /// the end of the file.
    pub fn add(&mut self, key: &ConfigKey, value: &str) {
        self.insert(key, Some(value.to_string()));
        self.dirty = true;
    }

    fn insert(&mut self, key: &ConfigKey, value: Option<String>) {
        let entry = ConfigEntry::new(key.clone(), value, self.level, self.layer_index);
        let header = key.header();

        let last_in_section = self.entries.iter().rposition(|e| e.key().in_section(&header));
        match last_in_section {
            Some(index) => self.entries.insert(index + 1, entry),
            None => {
                if !self.sections.contains(&header) {
                    self.sections.push(header);
                }
                self.entries.push(entry);
            }
        }
    }

    /// Removes every entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if there was nothing to remove.
    pub fn delete(&mut self, key: &ConfigKey) -> Result<usize> {
        self.remove_where(key, |_| true)
    }

    /// Replaces the value of every entry for `key` whose value matches
    /// `pattern`, or appends a new entry when none match.
    ///
    /// Returns the number of replaced entries.
    pub fn set_multivar(&mut self, key: &ConfigKey, pattern: &Regex, value: &str) -> usize {
        let mut replaced = 0;
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.key() == key && pattern.is_match(e.value()))
        {
            entry.set_value(Some(value.to_string()));
            replaced += 1;
        }
        if replaced == 0 {
            self.insert(key, Some(value.to_string()));
        }
        self.dirty = true;
        replaced
    }

    /// Removes every entry for `key` whose value matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no entry matched.
    pub fn delete_multivar(&mut self, key: &ConfigKey, pattern: &Regex) -> Result<usize> {
        self.remove_where(key, |e| pattern.is_match(e.value()))
    }

    fn remove_where(
        &mut self,
        key: &ConfigKey,
        matches: impl Fn(&ConfigEntry) -> bool,
    ) -> Result<usize> {
        let before = self.entries.len();
        self.entries.retain(|e| !(e.key() == key && matches(e)));
        let removed = before - self.entries.len();
        if removed == 0 {
            return Err(Error::key_not_found(key.as_str()));
        }
        self.dirty = true;
        Ok(removed)
    }

    /// Serializes the file to git config text.
    #[must_use]
    pub fn to_config_string(&self) -> String {
        writer::render(&self.sections, &self.entries)
    }

    /// Writes the file back to its backing path.
    ///
    /// The file is rewritten in canonical form: comments are not kept and
    /// repeated headers of one section are merged into the first.
    ///
    /// Does nothing for a file without a path; use [`ConfigFile::save_as`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            log::debug!("not saving in-memory config: no backing path");
            return Ok(());
        };
        self.write_to(&path)
    }

    /// Sets the backing path to `path` and writes the file there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        self.write_to(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Error::from_io(parent, e))?;
            }
        }

        let text = self.to_config_string();
        {
            let mut handle = fs::File::create(path).map_err(|e| Error::from_io(path, e))?;
            handle
                .write_all(text.as_bytes())
                .and_then(|()| handle.flush())
                .map_err(|e| Error::from_io(path, e))?;
        }

        log::debug!("wrote {} entries to {}", self.entries.len(), path.display());
        self.dirty = false;
        Ok(())
    }
}

/// Decodes file contents, reporting invalid UTF-8 at its line and column.
fn decode(bytes: Vec<u8>, path: &Path) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| {
        let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
        // the prefix is valid by construction
        let prefix = std::str::from_utf8(valid).unwrap_or_default();
        let line = prefix.matches('\n').count() + 1;
        let column = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        Error::Parse {
            path: Some(path.to_path_buf()),
            line,
            column,
            message: "invalid UTF-8".to_string(),
        }
    })
}
