//! Dotted configuration keys.
//!
//! Keys are addressed externally as `section.name` or
//! `section.subsection.name`. Section and name are case-insensitive and are
//! stored lowercased; the subsection keeps its casing verbatim and may itself
//! contain dots (everything between the first and the last dot).

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A validated, normalized configuration key.
///
/// # Examples
///
/// ```
/// use gitcfg::ConfigKey;
///
/// let key = ConfigKey::parse("Remote.Origin.URL").unwrap();
/// assert_eq!(key.section(), "remote");
/// assert_eq!(key.subsection(), Some("Origin"));
/// assert_eq!(key.name(), "url");
/// assert_eq!(key.as_str(), "remote.Origin.url");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey {
    section: String,
    subsection: Option<String>,
    name: String,
    canonical: String,
}

impl ConfigKey {
    /// Parses and normalizes a dotted key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key has no section, no name,
    /// or contains characters git does not allow.
    pub fn parse(raw: &str) -> Result<Self> {
        let first = raw.find('.').ok_or_else(|| invalid(raw, "key does not contain a section"))?;
        let last = raw.rfind('.').unwrap_or(first);

        let section = &raw[..first];
        let name = &raw[last + 1..];
        let subsection = (last > first).then(|| &raw[first + 1..last]);

        Self::from_parts(section, subsection, name).map_err(|err| match err {
            Error::InvalidKey { reason, .. } => invalid(raw, &reason),
            other => other,
        })
    }

    /// Builds a key from its parts, validating and normalizing each.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if any part is invalid.
    pub fn from_parts(section: &str, subsection: Option<&str>, name: &str) -> Result<Self> {
        validate_section(section)?;
        if let Some(sub) = subsection {
            validate_subsection(sub)?;
        }
        validate_name(name)?;

        let section = section.to_ascii_lowercase();
        let name = name.to_ascii_lowercase();
        let canonical = match subsection {
            Some(sub) => format!("{section}.{sub}.{name}"),
            None => format!("{section}.{name}"),
        };

        Ok(Self {
            section,
            subsection: subsection.map(str::to_string),
            name,
            canonical,
        })
    }

    /// The lowercased section.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The subsection, casing preserved.
    #[must_use]
    pub fn subsection(&self) -> Option<&str> {
        self.subsection.as_deref()
    }

    /// The lowercased variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical dotted form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Whether this key lives under the given section header.
    #[must_use]
    pub fn in_section(&self, header: &SectionHeader) -> bool {
        self.section == header.name && self.subsection.as_deref() == header.subsection.as_deref()
    }

    /// The section header this key belongs under.
    #[must_use]
    pub fn header(&self) -> SectionHeader {
        SectionHeader {
            name: self.section.clone(),
            subsection: self.subsection.clone(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl Serialize for ConfigKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::str::FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A `[section]` or `[section "subsection"]` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionHeader {
    /// Lowercased section name.
    pub name: String,
    /// Subsection, casing preserved.
    pub subsection: Option<String>,
}

fn invalid(key: &str, reason: &str) -> Error {
    Error::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_section(section: &str) -> Result<()> {
    if section.is_empty() {
        return Err(invalid(section, "empty section"));
    }
    if !section.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(section, "section may only contain letters, digits and '-'"));
    }
    Ok(())
}

fn validate_subsection(subsection: &str) -> Result<()> {
    if subsection.contains(['\n', '\0']) {
        return Err(invalid(subsection, "subsection may not contain newlines"));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid(name, "empty variable name"));
    };
    if !first.is_ascii_alphabetic() {
        return Err(invalid(name, "variable name must start with a letter"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(
            name,
            "variable name may only contain letters, digits and '-'",
        ));
    }
    Ok(())
}
