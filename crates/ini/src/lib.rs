//! Self-contained INI configuration engine
//!
//! Parses, queries, edits, and rewrites INI text with no platform profile
//! APIs underneath. The dialect is the widely shared core: `[section]`
//! headers, `key=value` entries split at the first `=`, full-line `;` or
//! `#` comments, LF or CRLF line endings, UTF-8 with an optional BOM on
//! input and never on output.
//!
//! Names compare case-insensitively by default and duplicates resolve
//! last-write-wins, with the first occurrence fixing position and
//! spelling. Declaration order survives every edit.
//!
//! # Quick Start
//!
//! ```
//! use ini::{parse, ParseOptions, WriteOptions, serialize};
//!
//! let mut doc = parse("[server]\nhost = example.org\n", ParseOptions::default())?;
//! doc.set_value("server", "port", "8080")?;
//! doc.set_value("client", "retries", "3")?;
//!
//! assert_eq!(doc.get_value("SERVER", "HOST"), Some("example.org"));
//! assert_eq!(
//!     serialize(&doc, WriteOptions::default()),
//!     "[server]\nhost=example.org\nport=8080\n\n[client]\nretries=3\n"
//! );
//! # Ok::<(), ini::IniError>(())
//! ```
//!
//! For settings files on disk, [`Profile`] adds the classic open, read
//! with default, write, save surface with atomic persistence:
//!
//! ```no_run
//! use ini::Profile;
//!
//! let mut profile = Profile::open("app.ini")?;
//! let theme = profile.read_value("ui", "theme", "dark");
//! profile.write_value("ui", "theme", "light")?;
//! profile.save()?;
//! # Ok::<(), ini::IniError>(())
//! ```
//!
//! # Layout Preservation
//!
//! By default serialization is canonical and deterministic: comments and
//! blank lines are dropped, spacing normalized. Parsing with
//! [`LayoutMode::Preserve`] instead retains comments, blank lines, and
//! tolerated defect lines, replaying them on serialization so edited
//! files stay recognizable.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

// =============================================================================
// Modules
// =============================================================================

pub mod document;
pub mod encoding;
pub mod error;
pub mod options;
pub mod parser;
pub mod profile;
pub mod writer;

#[cfg(test)]
mod document_props;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{IniDocument, IniSection};
pub use error::{IniError, MalformedKind, NameKind, ParseWarning, Result};
pub use options::{
    CasePolicy, LayoutMode, LineEnding, OrphanKeys, ParseMode, ParseOptions, WriteOptions,
};
pub use parser::{parse, parse_bytes};
pub use profile::Profile;
pub use writer::serialize;
