//! Line-oriented INI parser
//!
//! Parsing is a single forward pass over the input. Each physical line is
//! classified as blank, comment (`;` or `#` after leading whitespace),
//! section header, or key/value entry; everything else is a defect. In
//! tolerant mode defects become [`ParseWarning`]s on the finished document
//! and the line is skipped, in strict mode the first defect aborts with
//! [`IniError::MalformedLine`].
//!
//! The parser never mutates process-wide state and allocates only into the
//! document it returns.

use crate::document::IniDocument;
use crate::encoding::{strip_bom, validate_utf8};
use crate::error::{IniError, MalformedKind, ParseWarning, Result};
use crate::options::{LayoutMode, OrphanKeys, ParseMode, ParseOptions};
use memchr::memchr;

/// Parse INI text into a document.
///
/// A leading byte-order mark is ignored. Line endings may be `\n` or
/// `\r\n`, mixed freely. Entry values are trimmed, then stripped of one
/// wholly-wrapping pair of single or double quotes; quoting is the way to
/// keep significant leading or trailing whitespace.
///
/// Duplicate section headers reopen the existing section and duplicate
/// keys overwrite in place, so the last occurrence wins while the first
/// occurrence fixes position and spelling.
///
/// # Errors
///
/// Only [`ParseMode::Strict`] produces errors; a tolerant parse always
/// succeeds and reports defects through [`IniDocument::warnings`].
///
/// # Examples
///
/// ```
/// use ini::{parse, ParseOptions};
///
/// let doc = parse("[server]\nhost = example.org\n", ParseOptions::default()).unwrap();
/// assert_eq!(doc.get_value("server", "host"), Some("example.org"));
/// ```
pub fn parse(text: &str, options: ParseOptions) -> Result<IniDocument> {
    Parser::new(strip_bom(text), options).run()
}

/// Parse raw bytes, validating UTF-8 first.
///
/// # Errors
///
/// [`IniError::Utf8`] with the byte offset of the first invalid sequence,
/// plus anything [`parse`] can return.
pub fn parse_bytes(bytes: &[u8], options: ParseOptions) -> Result<IniDocument> {
    parse(validate_utf8(bytes)?, options)
}

struct Parser<'a> {
    input: &'a str,
    options: ParseOptions,
    doc: IniDocument,
    /// Blank, comment, and retained defect lines waiting to attach to the
    /// next section or entry. Only populated in preserve mode.
    pending: Vec<String>,
    /// Index of the open named section, `None` while in the root scope.
    current: Option<usize>,
    /// 1-indexed physical line number.
    line_no: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: ParseOptions) -> Self {
        let mut doc = IniDocument::with_case(options.case);
        if options.layout == LayoutMode::Preserve {
            doc.set_preserved();
        }
        Self {
            input,
            options,
            doc,
            pending: Vec::new(),
            current: None,
            line_no: 0,
        }
    }

    fn run(mut self) -> Result<IniDocument> {
        let mut remaining = self.input;
        while !remaining.is_empty() {
            let (line, rest) = match memchr(b'\n', remaining.as_bytes()) {
                Some(pos) => (&remaining[..pos], &remaining[pos + 1..]),
                None => (remaining, ""),
            };
            remaining = rest;
            self.line_no += 1;
            let line = line.strip_suffix('\r').unwrap_or(line);
            self.dispatch(line)?;
        }
        let trailing = std::mem::take(&mut self.pending);
        self.doc.set_trailing(trailing);
        Ok(self.doc)
    }

    fn dispatch(&mut self, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            self.retain(line);
            return Ok(());
        }
        if trimmed.starts_with('[') {
            return self.header(line, trimmed);
        }
        self.entry(line, trimmed)
    }

    /// `[name]`, with optional surrounding whitespace already trimmed away.
    fn header(&mut self, line: &str, trimmed: &str) -> Result<()> {
        let after_open = &trimmed[1..];
        let Some(close) = memchr(b']', after_open.as_bytes()) else {
            self.defect(MalformedKind::UnterminatedHeader, line)?;
            self.retain(line);
            return Ok(());
        };
        let name = after_open[..close].trim();
        if name.is_empty() {
            self.defect(MalformedKind::EmptySectionName, line)?;
            self.retain(line);
            return Ok(());
        }
        if !after_open[close + 1..].trim().is_empty() {
            // The section still opens; only the stray text is dropped.
            self.defect(MalformedKind::TextAfterHeader, line)?;
        }

        let idx = self.doc.ensure_named(name);
        let leading = std::mem::take(&mut self.pending);
        if !leading.is_empty() {
            self.doc.section_at_mut(idx).push_leading(leading);
        }
        self.current = Some(idx);
        Ok(())
    }

    /// `key = value`, split at the first `=` so values may contain `=`.
    fn entry(&mut self, line: &str, trimmed: &str) -> Result<()> {
        let Some(eq) = memchr(b'=', trimmed.as_bytes()) else {
            self.defect(MalformedKind::UnrecognizedLine, line)?;
            self.retain(line);
            return Ok(());
        };
        let key = trimmed[..eq].trim();
        if key.is_empty() {
            self.defect(MalformedKind::MissingKey, line)?;
            self.retain(line);
            return Ok(());
        }
        if self.current.is_none() && self.options.orphan_keys == OrphanKeys::Reject {
            self.defect(MalformedKind::OrphanEntry, line)?;
            self.retain(line);
            return Ok(());
        }

        let value = unquote(trimmed[eq + 1..].trim()).to_string();
        let leading = std::mem::take(&mut self.pending);
        match self.current {
            Some(idx) => self.doc.section_at_mut(idx).insert(key, value, leading),
            None => self.doc.root_mut().insert(key, value, leading),
        }
        Ok(())
    }

    /// Fail in strict mode, warn in tolerant mode.
    fn defect(&mut self, kind: MalformedKind, line: &str) -> Result<()> {
        if self.options.mode == ParseMode::Strict {
            return Err(IniError::malformed(self.line_no, kind, line));
        }
        self.doc.push_warning(ParseWarning::new(self.line_no, kind, line));
        Ok(())
    }

    /// Keep a layout line for replay. No-op in canonical mode.
    fn retain(&mut self, line: &str) {
        if self.options.layout == LayoutMode::Preserve {
            self.pending.push(line.to_string());
        }
    }
}

/// Strip one wholly-wrapping pair of matching quotes, if present.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
