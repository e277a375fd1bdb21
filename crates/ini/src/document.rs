//! In-memory INI document model
//!
//! An [`IniDocument`] owns an ordered sequence of named [`IniSection`]s,
//! each owning an ordered sequence of key/value entries. Both levels pair a
//! `Vec` (declaration order) with an `FxHashMap` from the case-folded name
//! to the vector index, so enumeration preserves order while lookups stay
//! O(1). Overwrites keep the original position and the first-seen spelling
//! of the name; only the value changes.
//!
//! Entries that appear before any section header live in a root scope
//! addressed by the empty section name `""`. Named sections always have
//! non-empty names.
//!
//! # Thread Safety
//!
//! A document is plain owned data: `Send + Sync`, but with no internal
//! locking. Share one across threads only behind external mutual
//! exclusion. See the compile-time assertions at the bottom of this
//! module.

use crate::error::{IniError, NameKind, ParseWarning, Result};
use crate::options::CasePolicy;
use rustc_hash::FxHashMap;
use std::fmt;

// =============================================================================
// Entries
// =============================================================================

/// A single key/value pair, plus the layout lines retained in front of it
/// when the document was parsed in preserve mode.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub key: String,
    pub value: String,
    pub leading: Vec<String>,
}

// =============================================================================
// Sections
// =============================================================================

/// A named group of ordered key/value entries.
///
/// Obtained read-only from [`IniDocument::section`]; all mutation goes
/// through the owning document so that dirty tracking stays accurate.
#[derive(Debug, Clone, PartialEq)]
pub struct IniSection {
    name: String,
    entries: Vec<Entry>,
    /// Case-folded key to entry index.
    lookup: FxHashMap<String, usize>,
    /// Layout lines retained in front of the section header.
    leading: Vec<String>,
    case: CasePolicy,
}

impl IniSection {
    pub(crate) fn new(name: impl Into<String>, case: CasePolicy) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            lookup: FxHashMap::default(),
            leading: Vec::new(),
            case,
        }
    }

    /// The section name as first declared. Empty only for the root scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a value by key under the document's case policy.
    pub fn get(&self, key: &str) -> Option<&str> {
        let folded = self.case.fold(key.trim());
        self.lookup.get(&folded).map(|&idx| self.entries[idx].value.as_str())
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Key/value pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.value.as_str()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup.contains_key(&self.case.fold(key.trim()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite an entry. Overwrites keep the entry position and
    /// first-seen key spelling; `leading` accumulates across duplicates.
    pub(crate) fn insert(&mut self, key: &str, value: String, leading: Vec<String>) {
        let folded = self.case.fold(key);
        if let Some(&idx) = self.lookup.get(&folded) {
            self.entries[idx].value = value;
            self.entries[idx].leading.extend(leading);
        } else {
            let idx = self.entries.len();
            self.entries.push(Entry {
                key: key.to_string(),
                value,
                leading,
            });
            self.lookup.insert(folded, idx);
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let folded = self.case.fold(key.trim());
        match self.lookup.remove(&folded) {
            Some(idx) => {
                self.entries.remove(idx);
                for v in self.lookup.values_mut() {
                    if *v > idx {
                        *v -= 1;
                    }
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_entries(&mut self) {
        self.entries.clear();
        self.lookup.clear();
        self.leading.clear();
    }

    pub(crate) fn raw_entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn push_leading(&mut self, lines: Vec<String>) {
        self.leading.extend(lines);
    }

    pub(crate) fn leading(&self) -> &[String] {
        &self.leading
    }
}

// =============================================================================
// Documents
// =============================================================================

/// The root value: an ordered collection of sections plus a root scope for
/// entries declared before any header.
///
/// Section names are unique within a document and key names are unique
/// within a section, both under the configured [`CasePolicy`]. Duplicates
/// encountered while parsing resolve last-write-wins.
///
/// A document tracks a dirty flag: any successful mutation sets it, and
/// persistence layers (see [`Profile`](crate::profile::Profile)) clear it
/// after writing. Freshly constructed and freshly parsed documents are
/// clean.
///
/// # Examples
///
/// ```
/// use ini::IniDocument;
///
/// let mut doc = IniDocument::new();
/// doc.set_value("Display", "Width", "1920").unwrap();
/// doc.set_value("Display", "Height", "1080").unwrap();
///
/// assert_eq!(doc.get_value("display", "WIDTH"), Some("1920"));
/// assert_eq!(doc.read_value("Display", "Depth", "32"), "32");
/// assert!(doc.is_dirty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IniDocument {
    /// Entries before any section header, addressed by section name `""`.
    root: IniSection,
    sections: Vec<IniSection>,
    /// Case-folded section name to index in `sections`.
    lookup: FxHashMap<String, usize>,
    case: CasePolicy,
    warnings: Vec<ParseWarning>,
    /// Layout lines after the last entry, retained in preserve mode.
    trailing: Vec<String>,
    /// Whether this document carries retained layout records.
    preserved: bool,
    dirty: bool,
}

impl IniDocument {
    /// Create an empty document with case-insensitive names.
    pub fn new() -> Self {
        Self::with_case(CasePolicy::default())
    }

    /// Create an empty document with the given name-comparison policy.
    ///
    /// The policy is fixed for the document's lifetime and applied
    /// uniformly to every section and key operation.
    pub fn with_case(case: CasePolicy) -> Self {
        Self {
            root: IniSection::new("", case),
            sections: Vec::new(),
            lookup: FxHashMap::default(),
            case,
            warnings: Vec::new(),
            trailing: Vec::new(),
            preserved: false,
            dirty: false,
        }
    }

    pub fn case_policy(&self) -> CasePolicy {
        self.case
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Look up a value. Returns `None` when the section or key is absent;
    /// no default substitution happens at this layer (see [`read_value`]).
    ///
    /// [`read_value`]: IniDocument::read_value
    pub fn get_value(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Borrow a section for read-only inspection.
    ///
    /// The empty name `""` addresses the root scope, which always exists.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        let name = name.trim();
        if name.is_empty() {
            return Some(&self.root);
        }
        let folded = self.case.fold(name);
        self.lookup.get(&folded).map(|&idx| &self.sections[idx])
    }

    /// Named section names in declaration order. The root scope is not
    /// listed.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Keys of a section in declaration order, or `None` when the section
    /// is absent.
    pub fn keys(&self, section: &str) -> Option<Vec<&str>> {
        self.section(section).map(|s| s.keys().collect())
    }

    /// Key/value pairs of a section in declaration order, or `None` when
    /// the section is absent. Used for bulk export.
    pub fn entries(&self, section: &str) -> Option<Vec<(&str, &str)>> {
        self.section(section).map(|s| s.entries().collect())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.get_value(section, key).is_some()
    }

    /// Number of named sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// True when there are no named sections and the root scope is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.root.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Create or overwrite an entry, creating the section if needed.
    ///
    /// An overwrite keeps the entry's original position; a new entry is
    /// appended. Section and key names are trimmed before validation. The
    /// empty section name targets the root scope. On any error the
    /// document is left unchanged.
    ///
    /// # Errors
    ///
    /// [`IniError::InvalidName`] for names that could not survive a
    /// serialize/parse cycle, [`IniError::InvalidValue`] for values
    /// containing a line break.
    pub fn set_value(&mut self, section: &str, key: &str, value: impl Into<String>) -> Result<()> {
        let section = section.trim();
        let key = key.trim();
        if !section.is_empty() {
            validate_section_name(section)?;
        }
        validate_key_name(key)?;
        let value = value.into();
        if value.contains('\n') || value.contains('\r') {
            return Err(IniError::InvalidValue { value });
        }

        if section.is_empty() {
            self.root.insert(key, value, Vec::new());
        } else {
            let idx = self.ensure_named(section);
            self.sections[idx].insert(key, value, Vec::new());
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove a section and all its entries. Returns `false` without
    /// mutating anything when the section does not exist.
    ///
    /// The empty name clears the root scope and reports whether it held
    /// any entries.
    pub fn delete_section(&mut self, section: &str) -> bool {
        let section = section.trim();
        if section.is_empty() {
            let had_entries = !self.root.is_empty();
            if had_entries {
                self.root.clear_entries();
                self.dirty = true;
            }
            return had_entries;
        }

        let folded = self.case.fold(section);
        match self.lookup.remove(&folded) {
            Some(idx) => {
                self.sections.remove(idx);
                for v in self.lookup.values_mut() {
                    if *v > idx {
                        *v -= 1;
                    }
                }
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Remove a single entry. Returns `false` without mutating anything
    /// when the section or key is absent. The section stays, even when it
    /// becomes empty.
    pub fn delete_key(&mut self, section: &str, key: &str) -> bool {
        let section = section.trim();
        let removed = if section.is_empty() {
            self.root.remove(key)
        } else {
            let folded = self.case.fold(section);
            match self.lookup.get(&folded) {
                Some(&idx) => self.sections[idx].remove(key),
                None => false,
            }
        };
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Drop all sections and root entries. Warnings from the original
    /// parse are kept.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.dirty = true;
        }
        self.root.clear_entries();
        self.sections.clear();
        self.lookup.clear();
        self.trailing.clear();
    }

    // -------------------------------------------------------------------------
    // Convenience wrappers (legacy profile-API contract shape)
    // -------------------------------------------------------------------------

    /// Look up a value, substituting `default` when the section or key is
    /// absent.
    pub fn read_value(&self, section: &str, key: &str, default: &str) -> String {
        self.get_value(section, key).unwrap_or(default).to_string()
    }

    /// All named section names, owned.
    pub fn read_sections(&self) -> Vec<String> {
        self.sections().map(String::from).collect()
    }

    /// All keys of a section, owned. Empty when the section is absent.
    pub fn read_keys(&self, section: &str) -> Vec<String> {
        match self.keys(section) {
            Some(keys) => keys.into_iter().map(String::from).collect(),
            None => Vec::new(),
        }
    }

    /// All key/value pairs of a section, owned. Empty when the section is
    /// absent.
    pub fn read_key_value_pairs(&self, section: &str) -> Vec<(String, String)> {
        match self.entries(section) {
            Some(entries) => entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            None => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Bookkeeping
    // -------------------------------------------------------------------------

    /// Defects tolerated by the parse that built this document. Empty for
    /// hand-built documents.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Whether the document changed since construction, parse, or the last
    /// [`clear_dirty`](IniDocument::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document clean, typically after persisting it.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Parser and serializer internals
    // -------------------------------------------------------------------------

    /// Find or create a named section without touching the dirty flag.
    pub(crate) fn ensure_named(&mut self, name: &str) -> usize {
        let folded = self.case.fold(name);
        if let Some(&idx) = self.lookup.get(&folded) {
            idx
        } else {
            let idx = self.sections.len();
            self.sections.push(IniSection::new(name, self.case));
            self.lookup.insert(folded, idx);
            idx
        }
    }

    pub(crate) fn section_at_mut(&mut self, idx: usize) -> &mut IniSection {
        &mut self.sections[idx]
    }

    pub(crate) fn root_mut(&mut self) -> &mut IniSection {
        &mut self.root
    }

    pub(crate) fn root(&self) -> &IniSection {
        &self.root
    }

    pub(crate) fn named(&self) -> &[IniSection] {
        &self.sections
    }

    pub(crate) fn push_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn set_preserved(&mut self) {
        self.preserved = true;
    }

    pub(crate) fn is_preserved(&self) -> bool {
        self.preserved
    }

    pub(crate) fn set_trailing(&mut self, lines: Vec<String>) {
        self.trailing = lines;
    }

    pub(crate) fn trailing(&self) -> &[String] {
        &self.trailing
    }
}

impl Default for IniDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IniDocument {
    /// Canonical serialization with default [`WriteOptions`].
    ///
    /// [`WriteOptions`]: crate::options::WriteOptions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::serialize(self, crate::options::WriteOptions::default()))
    }
}

// =============================================================================
// Name validation
// =============================================================================

fn validate_section_name(name: &str) -> Result<()> {
    if name.contains(']') {
        return Err(IniError::invalid_name(NameKind::Section, name, "must not contain ']'"));
    }
    if name.contains('\n') || name.contains('\r') {
        return Err(IniError::invalid_name(
            NameKind::Section,
            name,
            "must not contain a line break",
        ));
    }
    Ok(())
}

fn validate_key_name(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(IniError::invalid_name(NameKind::Key, key, "must not be empty"));
    }
    if key.contains('=') {
        return Err(IniError::invalid_name(NameKind::Key, key, "must not contain '='"));
    }
    if key.contains('\n') || key.contains('\r') {
        return Err(IniError::invalid_name(NameKind::Key, key, "must not contain a line break"));
    }
    // A key opening like a header or comment would change meaning on reparse.
    if key.starts_with('[') {
        return Err(IniError::invalid_name(NameKind::Key, key, "must not begin with '['"));
    }
    if key.starts_with(';') || key.starts_with('#') {
        return Err(IniError::invalid_name(
            NameKind::Key,
            key,
            "must not begin with a comment character",
        ));
    }
    Ok(())
}

// =============================================================================
// Thread Safety Compile-Time Assertions
// =============================================================================

/// Compile-time assertion that a type implements Send
const fn _assert_send<T: Send>() {}

/// Compile-time assertion that a type implements Sync
const fn _assert_sync<T: Sync>() {}

const _: () = _assert_send::<IniDocument>();
const _: () = _assert_sync::<IniDocument>();

const _: () = _assert_send::<IniSection>();
const _: () = _assert_sync::<IniSection>();
