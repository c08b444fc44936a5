//! Typed interpretation of raw configuration values.
//!
//! Git stores every value as text; these functions apply git's coercion
//! rules. Failures are reported as [`Error::TypeMismatch`] naming the key,
//! so callers can surface which setting is wrong.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Parses a git boolean.
///
/// `true`, `yes`, `on` and `1` are true; `false`, `no`, `off`, `0` and the
/// empty string are false (all case-insensitive). An implicit value (`None`)
/// is true.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] for anything else.
///
/// # Examples
///
/// ```
/// use gitcfg::value::parse_bool;
///
/// assert!(parse_bool("core.bare", Some("On")).unwrap());
/// assert!(parse_bool("core.bare", None).unwrap());
/// assert!(!parse_bool("core.bare", Some("0")).unwrap());
/// assert!(parse_bool("core.bare", Some("maybe")).is_err());
/// ```
pub fn parse_bool(key: &str, raw: Option<&str>) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(true);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" | "" => Ok(false),
        _ => Err(mismatch(key, raw, "boolean")),
    }
}

/// Parses a git integer with an optional `k`, `m` or `g` suffix.
///
/// Suffixes are case-insensitive and multiply by 1024, 1024² and 1024³.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value is not a number or the
/// scaled result does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use gitcfg::value::parse_int;
///
/// assert_eq!(parse_int("pack.window", "5k").unwrap(), 5120);
/// assert_eq!(parse_int("pack.window", "-2M").unwrap(), -2 * 1024 * 1024);
/// assert!(parse_int("pack.window", "ten").is_err());
/// ```
pub fn parse_int(key: &str, raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    let (digits, factor) = match trimmed.chars().last().map(|c| c.to_ascii_lowercase()) {
        Some('k') => (&trimmed[..trimmed.len() - 1], 1i64 << 10),
        Some('m') => (&trimmed[..trimmed.len() - 1], 1i64 << 20),
        Some('g') => (&trimmed[..trimmed.len() - 1], 1i64 << 30),
        _ => (trimmed, 1),
    };

    let unsigned = digits.strip_prefix(['+', '-']).unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(mismatch(key, raw, "integer"));
    }

    digits
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_mul(factor))
        .ok_or_else(|| mismatch(key, raw, "integer"))
}

/// Parses a git integer that must fit in an `i32`.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value is not an integer or is out
/// of range.
pub fn parse_i32(key: &str, raw: &str) -> Result<i32> {
    let wide = parse_int(key, raw)?;
    i32::try_from(wide).map_err(|_| mismatch(key, raw, "32-bit integer"))
}

/// Interprets a value as a path, expanding a leading `~` against `home`.
///
/// Handles `~` and `~/path`; `~user` is not supported.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] for `~user` syntax or when a `~` path is
/// used without a known home directory.
///
/// # Examples
///
/// ```
/// use gitcfg::value::parse_path;
/// use std::path::{Path, PathBuf};
///
/// let home = Path::new("/home/dev");
/// assert_eq!(
///     parse_path("core.excludesfile", "~/.gitignore", Some(home)).unwrap(),
///     PathBuf::from("/home/dev/.gitignore"),
/// );
/// assert_eq!(
///     parse_path("core.hooksPath", "/srv/hooks", None).unwrap(),
///     PathBuf::from("/srv/hooks"),
/// );
/// ```
pub fn parse_path(key: &str, raw: &str, home: Option<&Path>) -> Result<PathBuf> {
    if !raw.starts_with('~') {
        return Ok(PathBuf::from(raw));
    }

    let rest = if raw == "~" {
        ""
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        rest
    } else {
        return Err(mismatch(key, raw, "path (~user is not supported)"));
    };

    let home = home.ok_or_else(|| mismatch(key, raw, "path (home directory unknown)"))?;
    Ok(if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    })
}

/// Canonical text for a boolean.
#[must_use]
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn mismatch(key: &str, raw: &str, expected: &'static str) -> Error {
    Error::TypeMismatch {
        key: key.to_string(),
        value: raw.to_string(),
        expected,
    }
}
