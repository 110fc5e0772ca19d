//! Round-trip editing of Bnd instruction files
//!
//! An instruction file (`osgi.bnd`) is a Java-properties style list of
//! `key: value` directives:
//!
//! ```text
//! # exported API
//! Export-Package: com.example.api;version="1.0",\
//!  com.example.spi
//! Import-Package: *
//! ```
//!
//! Lines starting with `#` or `!` are comments, the separator is `:`, `=` or
//! whitespace, and a trailing unescaped backslash continues the line. Files
//! are ISO-8859-1; other characters are written as `\uXXXX` escapes.
//!
//! [`BndFile`] keeps two copies of the instructions: the ones last read from
//! or written to disk, and the working copy. Writing only regenerates the
//! lines of instructions whose value changed; everything else is echoed
//! byte for byte, so hand-made layout and comments survive repeated edits.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::defaults::{BND_FILE, DEFAULT_WRAP_WIDTH, LEGACY_INSTRUCTION, PACKAGING_INSTRUCTIONS};
use crate::error::{Error, Result};

/// Resolve a directory or file argument to the instruction file
pub fn bnd_file(location: &Path) -> PathBuf {
    if location.is_file() || location.file_name().is_some_and(|name| name == BND_FILE) {
        location.to_path_buf()
    } else {
        location.join(BND_FILE)
    }
}

/// An instruction file and its pending edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BndFile {
    path: PathBuf,
    /// Instructions as last read from or written to disk
    old: IndexMap<String, String>,
    /// Working copy
    new: IndexMap<String, String>,
    wrap_width: usize,
}

impl BndFile {
    /// Read the instruction file at `location`, a file or its directory
    ///
    /// A missing file yields an empty instruction set that is created on write.
    pub fn read(location: &Path) -> Result<Self> {
        let path = bnd_file(location);
        let content = if path.exists() {
            read_latin1(&path)?
        } else {
            String::new()
        };
        debug!("Read instruction file {}", path.display());
        Ok(Self::parse(path, &content))
    }

    /// Parse instruction content that notionally lives at `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let mut instructions = IndexMap::new();
        for logical in logical_lines(&lines) {
            if let LineKind::Entry { key, value } = logical.kind {
                instructions.insert(key, value);
            }
        }
        Self {
            path: path.into(),
            old: instructions.clone(),
            new: instructions,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }

    /// Change the line length above which regenerated instructions wrap
    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_instruction(&self, key: &str) -> Option<&str> {
        self.new.get(key).map(String::as_str)
    }

    pub fn has_instruction(&self, key: &str) -> bool {
        self.new.contains_key(key)
    }

    /// Current instructions in file order
    pub fn instructions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.new.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when the working copy differs from what is on disk
    pub fn is_modified(&self) -> bool {
        self.old != self.new
    }

    /// Set an instruction; `None` stores an empty value
    ///
    /// # Errors
    ///
    /// `Error::ExistingInstruction` when the key is already set and
    /// `overwrite` is false.
    pub fn set_instruction(&mut self, key: &str, value: Option<&str>, overwrite: bool) -> Result<()> {
        if !overwrite && self.new.contains_key(key) {
            return Err(Error::ExistingInstruction {
                path: self.path.clone(),
                instruction: key.to_string(),
            });
        }
        self.new
            .insert(key.to_string(), value.unwrap_or_default().to_string());
        Ok(())
    }

    /// Remove an instruction, returning whether it was set
    pub fn remove_instruction(&mut self, key: &str) -> bool {
        self.new.shift_remove(key).is_some()
    }

    /// Copy every instruction of `other` over this file
    ///
    /// When `other` declares its own packaging instructions, the legacy
    /// `-exportcontents` directive of the old default template goes first.
    pub fn overlay_instructions(&mut self, other: &BndFile) {
        if PACKAGING_INSTRUCTIONS
            .iter()
            .any(|key| other.has_instruction(key))
            && self.remove_instruction(LEGACY_INSTRUCTION)
        {
            debug!("Dropped {} from {}", LEGACY_INSTRUCTION, self.path.display());
        }
        for (key, value) in &other.new {
            self.new.insert(key.clone(), value.clone());
        }
    }

    /// Write the working copy, touching only changed instructions
    pub fn write(&mut self) -> Result<()> {
        let original = if self.path.exists() {
            read_latin1(&self.path)?
        } else {
            String::new()
        };
        let content = self.render(&original);

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| Error::document(dir, "create", e))?;
            }
        }
        fs::write(&self.path, encode_latin1(&content))
            .map_err(|e| Error::document(&self.path, "write", e))?;
        debug!("Wrote instruction file {}", self.path.display());

        self.old = self.new.clone();
        Ok(())
    }

    /// Produce the new file content from the original one
    pub fn render(&self, original: &str) -> String {
        let newline = if original.contains("\r\n") { "\r\n" } else { "\n" };
        let lines: Vec<&str> = original.lines().collect();

        let mut out: Vec<String> = Vec::new();
        let mut comments: Vec<String> = Vec::new();
        let mut written: HashSet<String> = HashSet::new();

        for logical in logical_lines(&lines) {
            let raw = &lines[logical.start..logical.end];
            match logical.kind {
                LineKind::Comment => comments.push(raw[0].to_string()),
                LineKind::Blank | LineKind::Malformed => {
                    out.append(&mut comments);
                    out.extend(raw.iter().map(|l| l.to_string()));
                }
                LineKind::Entry { key, .. } => {
                    let block = std::mem::take(&mut comments);
                    match self.new.get(&key) {
                        None if self.old.contains_key(&key) => {
                            // removed: its comment block goes with it
                        }
                        None => {
                            out.extend(block);
                            out.extend(raw.iter().map(|l| l.to_string()));
                        }
                        Some(value) => {
                            out.extend(block);
                            if self.old.get(&key) == Some(value) {
                                out.extend(raw.iter().map(|l| l.to_string()));
                            } else if !written.contains(&key) {
                                out.extend(format_instruction(&key, value, self.wrap_width));
                            }
                            written.insert(key);
                        }
                    }
                }
            }
        }
        out.append(&mut comments);

        for (key, value) in &self.new {
            if !written.contains(key) {
                out.extend(format_instruction(key, value, self.wrap_width));
            }
        }

        let mut content = out.join(newline);
        if !content.is_empty() {
            content.push_str(newline);
        }
        content
    }
}

////// LINE PARSING //////

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment,
    Entry { key: String, value: String },
    Malformed,
}

/// A logical line spanning physical lines `start..end`
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    start: usize,
    end: usize,
    kind: LineKind,
}

/// True when the line ends with an odd number of backslashes
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn logical_lines(lines: &[&str]) -> Vec<LogicalLine> {
    let mut result = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let trimmed = lines[index].trim_start();
        if trimmed.is_empty() {
            result.push(LogicalLine {
                start: index,
                end: index + 1,
                kind: LineKind::Blank,
            });
            index += 1;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with('!') {
            result.push(LogicalLine {
                start: index,
                end: index + 1,
                kind: LineKind::Comment,
            });
            index += 1;
            continue;
        }

        let start = index;
        let mut text = String::new();
        let mut current = trimmed;
        loop {
            index += 1;
            if continues(current) && index < lines.len() {
                text.push_str(&current[..current.len() - 1]);
                current = lines[index].trim_start();
            } else {
                if continues(current) {
                    text.push_str(&current[..current.len() - 1]);
                } else {
                    text.push_str(current);
                }
                break;
            }
        }

        let kind = match split_entry(&text) {
            Some((key, value)) => LineKind::Entry { key, value },
            None => LineKind::Malformed,
        };
        result.push(LogicalLine {
            start,
            end: index,
            kind,
        });
    }

    result
}

/// Split a joined logical line into unescaped key and value
fn split_entry(text: &str) -> Option<(String, String)> {
    let mut key_end = text.len();
    let mut escaped = false;
    for (position, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            ':' | '=' => {
                key_end = position;
                break;
            }
            c if c.is_whitespace() => {
                key_end = position;
                break;
            }
            _ => {}
        }
    }

    let key = unescape(&text[..key_end]);
    if key.is_empty() {
        return None;
    }

    let mut rest = text[key_end..].trim_start_matches(|c: char| c.is_whitespace());
    if let Some(stripped) = rest.strip_prefix(':').or_else(|| rest.strip_prefix('=')) {
        rest = stripped.trim_start_matches(|c: char| c.is_whitespace());
    }
    Some((key, unescape(rest)))
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => result.push('\t'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('f') => result.push('\u{c}'),
            Some('u') => match hex_unit(chars.as_str()) {
                Some(high @ 0xD800..=0xDBFF) => {
                    // a surrogate pair spans two escapes
                    let after = &chars.as_str()[4..];
                    let low = after.strip_prefix("\\u").and_then(hex_unit);
                    match low {
                        Some(low @ 0xDC00..=0xDFFF) => {
                            let decoded = char::decode_utf16([high, low])
                                .next()
                                .and_then(|c| c.ok())
                                .unwrap_or(char::REPLACEMENT_CHARACTER);
                            result.push(decoded);
                            chars = after[6..].chars();
                        }
                        _ => {
                            result.push(char::REPLACEMENT_CHARACTER);
                            chars = after.chars();
                        }
                    }
                }
                Some(unit) => {
                    let decoded = char::from_u32(u32::from(unit));
                    result.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
                    chars = chars.as_str()[4..].chars();
                }
                None => result.push('u'),
            },
            Some(other) => result.push(other),
            None => {}
        }
    }
    result
}

/// The UTF-16 unit spelled by the first four hex digits of `text`
fn hex_unit(text: &str) -> Option<u16> {
    let hex = text.get(..4)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

////// LINE GENERATION //////

fn escape_char(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{c}' => out.push_str("\\f"),
        c if (c as u32) > 0xFF => {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04X}", unit));
            }
        }
        c => out.push(c),
    }
}

fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (position, ch) in key.chars().enumerate() {
        match ch {
            ':' | '=' | ' ' => {
                out.push('\\');
                out.push(ch);
            }
            '#' | '!' if position == 0 => {
                out.push('\\');
                out.push(ch);
            }
            c => escape_char(&mut out, c),
        }
    }
    out
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (position, ch) in value.chars().enumerate() {
        if position == 0 && ch == ' ' {
            out.push_str("\\ ");
        } else {
            escape_char(&mut out, ch);
        }
    }
    out
}

/// Split an escaped value after every comma that is not inside quotes
fn split_clauses(value: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut escaped = false;

    for (position, ch) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (ch, quote) {
            ('\\', _) => escaped = true,
            ('\'' | '"', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            (',', None) => {
                clauses.push(&value[start..=position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    if start < value.len() {
        clauses.push(&value[start..]);
    }
    clauses
}

/// Physical lines for one instruction, wrapped at clause boundaries when long
fn format_instruction(key: &str, value: &str, wrap_width: usize) -> Vec<String> {
    let head = format!("{}:", escape_key(key));
    if value.is_empty() {
        return vec![head];
    }

    let escaped = escape_value(value);
    let single = format!("{} {}", head, escaped);
    let clauses = split_clauses(&escaped);
    if single.chars().count() <= wrap_width || clauses.len() < 2 {
        return vec![single];
    }

    // whitespace after a comma stays on the line it follows, since
    // continuation lines lose their leading whitespace when read back
    let mut lines: Vec<String> = Vec::with_capacity(clauses.len());
    let mut current = format!("{} {}", head, clauses[0]);
    for clause in &clauses[1..] {
        let body = clause.trim_start();
        current.push_str(&clause[..clause.len() - body.len()]);
        current.push('\\');
        lines.push(current);
        current = format!(" {}", body);
    }
    lines.push(current);
    lines
}

////// ENCODING //////

fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::document(path, "read", e))?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

fn encode_latin1(content: &str) -> Vec<u8> {
    content
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
