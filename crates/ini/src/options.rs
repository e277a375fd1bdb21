//! Parse and serialization options
//!
//! Every dialect choice the engine makes is an explicit option here, never
//! silent behavior. The defaults reproduce classic profile-file semantics:
//! case-insensitive names, tolerant parsing, orphan entries collected into
//! the root scope, canonical output.

/// How section and key names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CasePolicy {
    /// Names match regardless of case. Matches legacy profile-API
    /// semantics and is the default.
    #[default]
    Insensitive,
    /// Names match exactly.
    Sensitive,
}

impl CasePolicy {
    /// Fold a name into its lookup form under this policy.
    ///
    /// Stored names keep their first-seen spelling; only the lookup key is
    /// folded.
    pub(crate) fn fold(&self, name: &str) -> String {
        match self {
            CasePolicy::Insensitive => name.to_lowercase(),
            CasePolicy::Sensitive => name.to_string(),
        }
    }
}

/// How the parser reacts to malformed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseMode {
    /// Record a [`ParseWarning`](crate::error::ParseWarning) and continue.
    #[default]
    Tolerant,
    /// Abort with [`IniError::MalformedLine`](crate::error::IniError) on the
    /// first malformed line.
    Strict,
}

/// What to do with `key=value` lines before any section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrphanKeys {
    /// Store them in the root scope, addressable by the empty section
    /// name `""`.
    #[default]
    Collect,
    /// Treat them as malformed lines.
    Reject,
}

/// Whether comment and blank lines survive a parse/serialize cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    /// Drop them; serialization emits canonical spacing. Matches the
    /// legacy API, which discards all formatting.
    #[default]
    Canonical,
    /// Retain them as positioned records and replay them verbatim on
    /// serialization.
    Preserve,
}

/// Line terminator for serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseOptions {
    /// Name comparison policy, applied uniformly to sections and keys.
    pub case: CasePolicy,
    /// Tolerant or strict handling of malformed lines.
    pub mode: ParseMode,
    /// Handling of entries before the first section header.
    pub orphan_keys: OrphanKeys,
    /// Comment/blank line retention.
    pub layout: LayoutMode,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case(mut self, case: CasePolicy) -> Self {
        self.case = case;
        self
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_orphan_keys(mut self, orphan_keys: OrphanKeys) -> Self {
        self.orphan_keys = orphan_keys;
        self
    }

    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }
}

/// Serializer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOptions {
    /// Line terminator, `\n` by default. No BOM is ever emitted.
    pub line_ending: LineEnding,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_semantics() {
        let options = ParseOptions::default();
        assert_eq!(options.case, CasePolicy::Insensitive);
        assert_eq!(options.mode, ParseMode::Tolerant);
        assert_eq!(options.orphan_keys, OrphanKeys::Collect);
        assert_eq!(options.layout, LayoutMode::Canonical);

        assert_eq!(WriteOptions::default().line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_builders() {
        let options = ParseOptions::new()
            .with_case(CasePolicy::Sensitive)
            .with_mode(ParseMode::Strict)
            .with_orphan_keys(OrphanKeys::Reject)
            .with_layout(LayoutMode::Preserve);
        assert_eq!(options.case, CasePolicy::Sensitive);
        assert_eq!(options.mode, ParseMode::Strict);
        assert_eq!(options.orphan_keys, OrphanKeys::Reject);
        assert_eq!(options.layout, LayoutMode::Preserve);

        let write = WriteOptions::new().with_line_ending(LineEnding::CrLf);
        assert_eq!(write.line_ending.as_str(), "\r\n");
    }

    #[test]
    fn test_case_fold() {
        assert_eq!(CasePolicy::Insensitive.fold("MiXeD"), "mixed");
        assert_eq!(CasePolicy::Sensitive.fold("MiXeD"), "MiXeD");
    }
}
