//! Error and warning types for dx-ini
//!
//! All fallible operations return [`Result`]. Absent sections or keys are
//! never errors: lookups return `Option` and deletes return `bool`, so
//! [`IniError`] covers only conditions that corrupt data or abort a parse.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IniError>;

/// Why a line was rejected by the parser.
///
/// Carried by [`ParseWarning`] in tolerant mode and by
/// [`IniError::MalformedLine`] in strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MalformedKind {
    /// Not a section header, entry, or comment.
    UnrecognizedLine,
    /// Line starts with `[` but the closing `]` is missing.
    UnterminatedHeader,
    /// Section header with nothing between the brackets.
    EmptySectionName,
    /// Text after the closing `]` of a section header.
    TextAfterHeader,
    /// Entry line with nothing before the `=`.
    MissingKey,
    /// Entry line before any section header, with orphan collection disabled.
    OrphanEntry,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MalformedKind::UnrecognizedLine => "not a section header, entry, or comment",
            MalformedKind::UnterminatedHeader => "section header is missing its closing ']'",
            MalformedKind::EmptySectionName => "section name is empty",
            MalformedKind::TextAfterHeader => "unexpected text after section header",
            MalformedKind::MissingKey => "entry is missing a key before '='",
            MalformedKind::OrphanEntry => "entry appears before any section header",
        };
        f.write_str(msg)
    }
}

/// Which kind of name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Section,
    Key,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Section => f.write_str("section"),
            NameKind::Key => f.write_str("key"),
        }
    }
}

/// A tolerated defect recorded during parsing.
///
/// Warnings are plain data attached to the parsed document; the parser
/// itself never logs. `line` is 1-indexed, `content` is the offending line
/// without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseWarning {
    pub line: usize,
    pub kind: MalformedKind,
    pub content: String,
}

impl ParseWarning {
    pub fn new(line: usize, kind: MalformedKind, content: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            content: content.into(),
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {:?}", self.line, self.kind, self.content)
    }
}

/// Error type for all dx-ini operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IniError {
    /// A line matched no recognized form while parsing in strict mode.
    #[error("Malformed line {line}: {reason}: {content:?}")]
    MalformedLine {
        /// 1-indexed line number in the input.
        line: usize,
        reason: MalformedKind,
        /// The offending line, without its terminator.
        content: String,
    },

    /// A section or key name rejected by a mutation. The document is
    /// left unchanged.
    #[error("Invalid {kind} name {name:?}: {reason}")]
    InvalidName {
        kind: NameKind,
        name: String,
        reason: &'static str,
    },

    /// A value rejected by a mutation. The document is left unchanged.
    #[error("Invalid value {value:?}: must not contain a line break")]
    InvalidValue { value: String },

    /// Input bytes are not valid UTF-8.
    #[error("Invalid UTF-8 at byte offset {offset}")]
    Utf8 { offset: usize },

    /// I/O failure in the profile layer (wraps std::io::Error message).
    #[error("IO error: {0}")]
    Io(String),
}

impl IniError {
    /// Create a malformed line error
    pub fn malformed(line: usize, reason: MalformedKind, content: impl Into<String>) -> Self {
        IniError::MalformedLine {
            line,
            reason,
            content: content.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(kind: NameKind, name: impl Into<String>, reason: &'static str) -> Self {
        IniError::InvalidName {
            kind,
            name: name.into(),
            reason,
        }
    }

    /// Get the 1-indexed line number if available
    pub fn line(&self) -> Option<usize> {
        match self {
            IniError::MalformedLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IniError {
    fn from(err: std::io::Error) -> Self {
        IniError::Io(err.to_string())
    }
}

impl From<std::str::Utf8Error> for IniError {
    fn from(err: std::str::Utf8Error) -> Self {
        IniError::Utf8 {
            offset: err.valid_up_to(),
        }
    }
}

impl From<std::string::FromUtf8Error> for IniError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        IniError::Utf8 {
            offset: err.utf8_error().valid_up_to(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_display() {
        let err = IniError::malformed(3, MalformedKind::UnrecognizedLine, "garbage");
        assert_eq!(
            err.to_string(),
            "Malformed line 3: not a section header, entry, or comment: \"garbage\""
        );
    }

    #[test]
    fn test_invalid_name_display() {
        let err = IniError::invalid_name(NameKind::Section, "a]b", "must not contain ']'");
        assert_eq!(err.to_string(), "Invalid section name \"a]b\": must not contain ']'");

        let err = IniError::invalid_name(NameKind::Key, "", "must not be empty");
        assert_eq!(err.to_string(), "Invalid key name \"\": must not be empty");
    }

    #[test]
    fn test_line_accessor() {
        let err = IniError::malformed(7, MalformedKind::MissingKey, "=value");
        assert_eq!(err.line(), Some(7));

        let err = IniError::Utf8 { offset: 12 };
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: IniError = io.into();
        assert!(matches!(err, IniError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_from_utf8_error() {
        // "He" followed by an invalid continuation byte
        let bytes = &[0x48, 0x65, 0x80];
        let err: IniError = std::str::from_utf8(bytes).unwrap_err().into();
        assert_eq!(err, IniError::Utf8 { offset: 2 });
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning::new(5, MalformedKind::TextAfterHeader, "[Sec] junk");
        assert_eq!(
            warning.to_string(),
            "line 5: unexpected text after section header: \"[Sec] junk\""
        );
    }

    #[test]
    fn test_errors_are_cloneable_and_comparable() {
        let err = IniError::malformed(1, MalformedKind::OrphanEntry, "k=v");
        assert_eq!(err.clone(), err);
    }
}
