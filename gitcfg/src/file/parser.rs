//! Reader for the git config text format.
//!
//! The parser is a single forward pass over characters. `\r\n` reads as
//! `\n` and end of input reads as a final `\n`, so every construct ends on
//! a newline. Positions are tracked for error reporting.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use crate::error::{Error, Result};
use crate::key::{ConfigKey, SectionHeader};

/// The result of parsing one file: headers in order of first appearance
/// and entries in file order.
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    pub sections: Vec<SectionHeader>,
    pub entries: Vec<(ConfigKey, Option<String>)>,
}

/// Parses config text. `path` is only used in error messages.
pub(crate) fn parse(text: &str, path: Option<&Path>) -> Result<Parsed> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    Parser::new(text, path).run()
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    path: Option<&'a Path>,
    line: usize,
    column: usize,
    at_line_start: bool,
    eof: bool,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, path: Option<&'a Path>) -> Self {
        Self {
            chars: text.chars().peekable(),
            path,
            line: 0,
            column: 0,
            at_line_start: true,
            eof: false,
        }
    }

    fn next_char(&mut self) -> char {
        if self.eof {
            return '\n';
        }
        let c = match self.chars.next() {
            None => {
                self.eof = true;
                '\n'
            }
            Some('\r') if self.chars.peek() == Some(&'\n') => {
                self.chars.next();
                '\n'
            }
            Some(c) => c,
        };
        if self.at_line_start {
            self.line += 1;
            self.column = 0;
            self.at_line_start = false;
        }
        self.column += 1;
        if c == '\n' {
            self.at_line_start = true;
        }
        c
    }

    fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(self.line.max(1), self.column.max(1), message)
    }

    fn error_at(&self, line: usize, column: usize, message: impl Into<String>) -> Error {
        Error::Parse {
            path: self.path.map(Path::to_path_buf),
            line,
            column,
            message: message.into(),
        }
    }

    fn run(mut self) -> Result<Parsed> {
        let mut parsed = Parsed::default();
        let mut current: Option<SectionHeader> = None;
        let mut comment = false;

        loop {
            let c = self.next_char();
            if c == '\n' {
                if self.eof {
                    return Ok(parsed);
                }
                comment = false;
                continue;
            }
            if comment || c.is_ascii_whitespace() {
                continue;
            }
            if c == '#' || c == ';' {
                comment = true;
                continue;
            }
            if c == '[' {
                let header = self.section_header()?;
                if !parsed.sections.contains(&header) {
                    parsed.sections.push(header.clone());
                }
                current = Some(header);
                continue;
            }
            if !c.is_ascii_alphabetic() {
                return Err(self.error(format!("unexpected character {c:?}")));
            }

            let (line, column) = (self.line, self.column);
            let Some(header) = current.as_ref() else {
                return Err(self.error_at(line, column, "key outside of any section"));
            };
            let (name, value, trailing_comment) = self.key_value(c)?;
            let key = ConfigKey::from_parts(&header.name, header.subsection.as_deref(), &name)
                .map_err(|err| self.error_at(line, column, err.to_string()))?;
            parsed.entries.push((key, value));
            comment = trailing_comment;
        }
    }

    /// Reads a header after its opening `[`.
    fn section_header(&mut self) -> Result<SectionHeader> {
        let mut name = String::new();
        loop {
            let c = self.next_char();
            if self.eof || c == '\n' {
                return Err(self.error("unterminated section header"));
            }
            if c == ']' {
                return self.plain_header(name);
            }
            if c == ' ' || c == '\t' {
                return self.extended_header(name);
            }
            if !(c.is_ascii_alphanumeric() || c == '-' || c == '.') {
                return Err(self.error(format!("invalid character {c:?} in section name")));
            }
            name.push(c.to_ascii_lowercase());
        }
    }

    /// `[section]`, or the legacy `[section.subsection]` form whose
    /// subsection is case-insensitive.
    fn plain_header(&self, name: String) -> Result<SectionHeader> {
        let (section, subsection) = match name.split_once('.') {
            Some((section, sub)) => (section.to_string(), Some(sub.to_string())),
            None => (name, None),
        };
        if section.is_empty() || subsection.as_deref() == Some("") {
            return Err(self.error("empty section name"));
        }
        Ok(SectionHeader {
            name: section,
            subsection,
        })
    }

    /// `[section "subsection"]`, positioned after the whitespace that
    /// follows the section name.
    fn extended_header(&mut self, name: String) -> Result<SectionHeader> {
        if name.is_empty() || name.contains('.') {
            return Err(self.error("invalid section name before subsection"));
        }

        let mut c = self.next_char();
        while c == ' ' || c == '\t' {
            c = self.next_char();
        }
        if c != '"' {
            return Err(self.error("expected '\"' to open subsection"));
        }

        let mut subsection = String::new();
        loop {
            let mut c = self.next_char();
            if c == '\n' {
                return Err(self.error("unterminated subsection"));
            }
            if c == '"' {
                break;
            }
            if c == '\\' {
                c = self.next_char();
                if c == '\n' {
                    return Err(self.error("unterminated subsection"));
                }
            }
            subsection.push(c);
        }

        if self.next_char() != ']' {
            return Err(self.error("expected ']' after subsection"));
        }
        Ok(SectionHeader {
            name,
            subsection: Some(subsection),
        })
    }

    /// Reads a key starting with `first`, then its value if any.
    ///
    /// Returns the lowercased name, the value (`None` when implicit) and
    /// whether the rest of the line is a comment.
    fn key_value(&mut self, first: char) -> Result<(String, Option<String>, bool)> {
        let mut name = String::new();
        name.push(first.to_ascii_lowercase());

        let mut c = self.next_char();
        while !self.eof && (c.is_ascii_alphanumeric() || c == '-') {
            name.push(c.to_ascii_lowercase());
            c = self.next_char();
        }
        while c == ' ' || c == '\t' {
            c = self.next_char();
        }

        match c {
            '\n' => Ok((name, None, false)),
            '#' | ';' => Ok((name, None, true)),
            '=' => Ok((name, Some(self.value()?), false)),
            other => Err(self.error(format!("unexpected character {other:?} after key '{name}'"))),
        }
    }

    /// Reads a value up to and including the end of its line.
    fn value(&mut self) -> Result<String> {
        let mut value = String::new();
        let mut quoted = false;
        let mut comment = false;
        let mut pending_spaces = 0usize;

        loop {
            let c = self.next_char();
            if c == '\n' {
                if quoted {
                    return Err(self.error("unterminated quoted value"));
                }
                return Ok(value);
            }
            if comment {
                continue;
            }
            if c.is_ascii_whitespace() && !quoted {
                if !value.is_empty() {
                    pending_spaces += 1;
                }
                continue;
            }
            if !quoted && (c == '#' || c == ';') {
                comment = true;
                continue;
            }

            for _ in 0..pending_spaces {
                value.push(' ');
            }
            pending_spaces = 0;

            match c {
                '\\' => match self.next_char() {
                    '\n' if self.eof => {
                        return Err(self.error("backslash at end of input"));
                    }
                    '\n' => {}
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'b' => value.push('\u{8}'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    other => {
                        return Err(self.error(format!("invalid escape sequence '\\{other}'")));
                    }
                },
                '"' => quoted = !quoted,
                other => value.push(other),
            }
        }
    }
}
