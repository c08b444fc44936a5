//! Serializer for the git config text format.
//!
//! Output uses git's own layout: a header per section, one tab-indented
//! `name = value` line per entry. Values are quoted and escaped only as
//! much as the parser needs to read them back unchanged.

use std::fmt::Write as _;

use crate::entry::ConfigEntry;
use crate::key::SectionHeader;

/// Renders `entries` grouped under `sections`, in the order given.
///
/// Every entry's header must appear in `sections`; headers without entries
/// are still written.
pub(crate) fn render(sections: &[SectionHeader], entries: &[ConfigEntry]) -> String {
    let mut out = String::new();
    for header in sections {
        write_header(&mut out, header);
        for entry in entries.iter().filter(|e| e.key().in_section(header)) {
            match entry.raw_value() {
                Some(value) => {
                    let _ = writeln!(out, "\t{} = {}", entry.key().name(), format_value(value));
                }
                None => {
                    let _ = writeln!(out, "\t{}", entry.key().name());
                }
            }
        }
    }
    out
}

fn write_header(out: &mut String, header: &SectionHeader) {
    match &header.subsection {
        Some(sub) => {
            let escaped = sub.replace('\\', "\\\\").replace('"', "\\\"");
            let _ = writeln!(out, "[{} \"{escaped}\"]", header.name);
        }
        None => {
            let _ = writeln!(out, "[{}]", header.name);
        }
    }
}

/// Escapes and, where needed, quotes a value.
pub(crate) fn format_value(value: &str) -> String {
    let needs_quotes = value.starts_with(|c: char| c.is_ascii_whitespace())
        || value.ends_with(|c: char| c.is_ascii_whitespace())
        || value.contains(['#', ';', '\r', '\u{c}']);

    let mut out = String::with_capacity(value.len() + 2);
    if needs_quotes {
        out.push('"');
    }
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            other => out.push(other),
        }
    }
    if needs_quotes {
        out.push('"');
    }
    out
}
