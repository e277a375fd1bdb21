//! INI serialization
//!
//! Two rendering strategies share one entry encoder. Canonical output is
//! fully normalized: root entries first, one blank line between blocks,
//! `key=value` entries, a single trailing newline. Documents parsed in
//! preserve mode instead replay their retained layout lines (comments,
//! blanks, tolerated defects) around the live entries, so a parse/serialize
//! cycle keeps the file recognizable to its author.
//!
//! Output is deterministic: the same document and options always produce
//! the same string, byte for byte.

use crate::document::{IniDocument, IniSection};
use crate::options::WriteOptions;
use std::borrow::Cow;

/// Render a document to INI text.
///
/// Values with significant leading or trailing whitespace, and values that
/// are themselves wrapped in matching quotes, are emitted double-quoted so
/// they survive a reparse. Everything else is written verbatim.
///
/// An empty document renders as the empty string.
///
/// # Examples
///
/// ```
/// use ini::{IniDocument, WriteOptions, serialize};
///
/// let mut doc = IniDocument::new();
/// doc.set_value("server", "host", "example.org").unwrap();
/// assert_eq!(serialize(&doc, WriteOptions::default()), "[server]\nhost=example.org\n");
/// ```
pub fn serialize(doc: &IniDocument, options: WriteOptions) -> String {
    if doc.is_preserved() {
        replay(doc, options)
    } else {
        canonical(doc, options)
    }
}

fn canonical(doc: &IniDocument, options: WriteOptions) -> String {
    let eol = options.line_ending.as_str();
    let mut out = String::new();
    let mut first_block = true;

    if !doc.root().is_empty() {
        push_entries(&mut out, doc.root(), eol);
        first_block = false;
    }
    for section in doc.named() {
        if !first_block {
            out.push_str(eol);
        }
        first_block = false;
        push_header(&mut out, section, eol);
        push_entries(&mut out, section, eol);
    }
    out
}

/// Replay retained layout: leading lines before each section and entry,
/// trailing lines at the end, no synthesized blank lines.
fn replay(doc: &IniDocument, options: WriteOptions) -> String {
    let eol = options.line_ending.as_str();
    let mut out = String::new();

    push_entries_with_leading(&mut out, doc.root(), eol);
    for section in doc.named() {
        for line in section.leading() {
            out.push_str(line);
            out.push_str(eol);
        }
        push_header(&mut out, section, eol);
        push_entries_with_leading(&mut out, section, eol);
    }
    for line in doc.trailing() {
        out.push_str(line);
        out.push_str(eol);
    }
    out
}

fn push_header(out: &mut String, section: &IniSection, eol: &str) {
    out.push('[');
    out.push_str(section.name());
    out.push(']');
    out.push_str(eol);
}

fn push_entries(out: &mut String, section: &IniSection, eol: &str) {
    for entry in section.raw_entries() {
        out.push_str(&entry.key);
        out.push('=');
        out.push_str(&encode_value(&entry.value));
        out.push_str(eol);
    }
}

fn push_entries_with_leading(out: &mut String, section: &IniSection, eol: &str) {
    for entry in section.raw_entries() {
        for line in &entry.leading {
            out.push_str(line);
            out.push_str(eol);
        }
        out.push_str(&entry.key);
        out.push('=');
        out.push_str(&encode_value(&entry.value));
        out.push_str(eol);
    }
}

fn encode_value(value: &str) -> Cow<'_, str> {
    if needs_quoting(value) {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// True when a verbatim rendering would not reparse to the same value.
fn needs_quoting(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if value.trim() != value {
        return true;
    }
    let bytes = value.as_bytes();
    bytes.len() >= 2
        && bytes[0] == bytes[bytes.len() - 1]
        && (bytes[0] == b'"' || bytes[0] == b'\'')
}
