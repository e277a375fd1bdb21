//! File-backed profile convenience layer
//!
//! [`Profile`] pairs an [`IniDocument`] with the path it came from, giving
//! callers the classic profile-file surface: open, read with a default,
//! write, delete, save. A missing file opens as an empty profile rather
//! than an error, so first-run code can read defaults and write settings
//! without probing for the file.
//!
//! Saving is atomic: the rendered text goes to a sibling `.tmp` file which
//! is then renamed over the target, so a crash mid-save never leaves a
//! truncated profile behind.
//!
//! This is the only module that touches the filesystem or emits tracing
//! events. The document, parser, and writer stay pure.

use crate::document::IniDocument;
use crate::error::{IniError, Result};
use crate::options::{LineEnding, ParseOptions, WriteOptions};
use crate::parser::parse_bytes;
use crate::writer::serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An INI document bound to a file on disk.
///
/// # Examples
///
/// ```no_run
/// use ini::Profile;
///
/// let mut profile = Profile::open("app.ini")?;
/// let theme = profile.read_value("ui", "theme", "dark");
/// profile.write_value("ui", "theme", "light")?;
/// profile.save()?;
/// # Ok::<(), ini::IniError>(())
/// ```
#[derive(Debug)]
pub struct Profile {
    path: PathBuf,
    doc: IniDocument,
    write_options: WriteOptions,
}

impl Profile {
    /// Open a profile with default parse options.
    ///
    /// A file that does not exist yields an empty profile; any other I/O
    /// failure is an error.
    ///
    /// # Errors
    ///
    /// [`IniError::Io`] for filesystem failures other than a missing file,
    /// [`IniError::Utf8`] for undecodable content. With default tolerant
    /// parsing, malformed lines become warnings, not errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, ParseOptions::default())
    }

    /// Open a profile, parsing its content with the given options.
    pub fn open_with(path: impl Into<PathBuf>, options: ParseOptions) -> Result<Self> {
        let path = path.into();
        let doc = match fs::read(&path) {
            Ok(bytes) => {
                let doc = parse_bytes(&bytes, options)?;
                if !doc.warnings().is_empty() {
                    warn!(
                        "Tolerated {} malformed line(s) in {:?}",
                        doc.warnings().len(),
                        path
                    );
                }
                debug!("Loaded profile {:?} ({} bytes)", path, bytes.len());
                doc
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Profile {:?} not found, starting empty", path);
                // Parsing empty input applies the case and layout options
                // the caller asked for.
                parse_bytes(b"", options)?
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            doc,
            write_options: WriteOptions::default(),
        })
    }

    /// Bind an empty document to a path without touching the filesystem.
    /// Nothing exists on disk until [`save`](Profile::save).
    pub fn create(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            doc: IniDocument::new(),
            write_options: WriteOptions::default(),
        }
    }

    /// Choose the line ending used by [`save`](Profile::save).
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.write_options = self.write_options.with_line_ending(line_ending);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &IniDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut IniDocument {
        &mut self.doc
    }

    // -------------------------------------------------------------------------
    // Document pass-throughs
    // -------------------------------------------------------------------------

    /// Read a value, substituting `default` when the section or key is
    /// absent.
    pub fn read_value(&self, section: &str, key: &str, default: &str) -> String {
        self.doc.read_value(section, key, default)
    }

    pub fn read_sections(&self) -> Vec<String> {
        self.doc.read_sections()
    }

    pub fn read_keys(&self, section: &str) -> Vec<String> {
        self.doc.read_keys(section)
    }

    pub fn read_key_value_pairs(&self, section: &str) -> Vec<(String, String)> {
        self.doc.read_key_value_pairs(section)
    }

    /// Create or overwrite an entry. See [`IniDocument::set_value`].
    ///
    /// # Errors
    ///
    /// [`IniError::InvalidName`] and [`IniError::InvalidValue`], as for
    /// the document call.
    pub fn write_value(&mut self, section: &str, key: &str, value: impl Into<String>) -> Result<()> {
        self.doc.set_value(section, key, value)
    }

    /// Remove an entry. Returns `false` when the section or key is absent.
    pub fn delete_key(&mut self, section: &str, key: &str) -> bool {
        self.doc.delete_key(section, key)
    }

    /// Remove a section and all its entries. Returns `false` when the
    /// section is absent.
    pub fn delete_section(&mut self, section: &str) -> bool {
        self.doc.delete_section(section)
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Write the document to its path and mark it clean.
    ///
    /// The text lands in a sibling `.tmp` file first and is renamed into
    /// place, so readers never observe a partially written profile.
    ///
    /// # Errors
    ///
    /// [`IniError::Io`] when the path has no file name or the filesystem
    /// rejects the write or rename.
    pub fn save(&mut self) -> Result<()> {
        let text = serialize(&self.doc, self.write_options);

        let Some(file_name) = self.path.file_name() else {
            return Err(IniError::Io(format!("invalid profile path: {:?}", self.path)));
        };
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        fs::write(&tmp, &text)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }

        self.doc.clear_dirty();
        debug!("Saved profile {:?} ({} bytes)", self.path, text.len());
        Ok(())
    }

    /// Save only when the document changed. Returns whether a write
    /// happened.
    ///
    /// # Errors
    ///
    /// As for [`save`](Profile::save).
    pub fn save_if_dirty(&mut self) -> Result<bool> {
        if self.doc.is_dirty() {
            self.save()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Compile-time assertion that a type implements Send
const fn _assert_send<T: Send>() {}

/// Compile-time assertion that a type implements Sync
const fn _assert_sync<T: Sync>() {}

const _: () = _assert_send::<Profile>();
const _: () = _assert_sync::<Profile>();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{LayoutMode, ParseMode};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempdir().unwrap();
        let profile = Profile::open(dir.path().join("absent.ini")).unwrap();
        assert!(profile.document().is_empty());
        assert_eq!(profile.read_value("any", "key", "fallback"), "fallback");
    }

    #[test]
    fn test_create_save_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ini");

        let mut profile = Profile::create(&path);
        profile.write_value("ui", "theme", "dark").unwrap();
        profile.write_value("ui", "scale", "2").unwrap();
        profile.save().unwrap();

        let reopened = Profile::open(&path).unwrap();
        assert_eq!(reopened.read_value("ui", "theme", ""), "dark");
        assert_eq!(reopened.read_value("ui", "scale", ""), "2");
        assert_eq!(reopened.read_sections(), vec!["ui".to_string()]);
    }

    #[test]
    fn test_save_writes_canonical_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.ini");

        let mut profile = Profile::create(&path);
        profile.write_value("s", "k", "v").unwrap();
        profile.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nk=v\n");
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.ini");

        let mut profile = Profile::create(&path);
        profile.write_value("s", "k", "v").unwrap();
        profile.save().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["clean.ini".to_string()]);
    }

    #[test]
    fn test_save_if_dirty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dirty.ini");

        let mut profile = Profile::create(&path);
        assert!(!profile.save_if_dirty().unwrap());
        assert!(!path.exists());

        profile.write_value("s", "k", "v").unwrap();
        assert!(profile.save_if_dirty().unwrap());
        assert!(path.exists());
        assert!(!profile.save_if_dirty().unwrap());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rewrite.ini");
        fs::write(&path, "[old]\ngone = soon\n").unwrap();

        let mut profile = Profile::open(&path).unwrap();
        assert!(profile.delete_section("old"));
        profile.write_value("new", "k", "v").unwrap();
        profile.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[new]\nk=v\n");
    }

    #[test]
    fn test_crlf_line_ending() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dos.ini");

        let mut profile = Profile::create(&path).with_line_ending(LineEnding::CrLf);
        profile.write_value("s", "k", "v").unwrap();
        profile.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\r\nk=v\r\n");
    }

    #[test]
    fn test_preserve_mode_keeps_comments_across_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("annotated.ini");
        fs::write(&path, "; human note\n[s]\nk=old\n").unwrap();

        let options = ParseOptions::default().with_layout(LayoutMode::Preserve);
        let mut profile = Profile::open_with(&path, options).unwrap();
        profile.write_value("s", "k", "new").unwrap();
        profile.save().unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "; human note\n[s]\nk=new\n"
        );
    }

    #[test]
    fn test_open_surfaces_warnings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scruffy.ini");
        fs::write(&path, "[s]\nk = v\nnot a real line\n").unwrap();

        let profile = Profile::open(&path).unwrap();
        assert_eq!(profile.document().warnings().len(), 1);
        assert_eq!(profile.read_value("s", "k", ""), "v");
    }

    #[test]
    fn test_open_strict_propagates_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strict.ini");
        fs::write(&path, "broken line\n").unwrap();

        let options = ParseOptions::default().with_mode(ParseMode::Strict);
        let err = Profile::open_with(&path, options).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_open_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.ini");
        fs::write(&path, b"[s]\nk = \xFF\xFE\n").unwrap();

        assert!(matches!(Profile::open(&path), Err(IniError::Utf8 { .. })));
    }

    #[test]
    fn test_save_rejects_pathless_target() {
        let mut profile = Profile::create("/");
        profile.write_value("s", "k", "v").unwrap();
        assert!(matches!(profile.save(), Err(IniError::Io(_))));
    }

    #[test]
    fn test_delete_key_pass_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("del.ini");
        fs::write(&path, "[s]\na = 1\nb = 2\n").unwrap();

        let mut profile = Profile::open(&path).unwrap();
        assert!(profile.delete_key("s", "a"));
        assert!(!profile.delete_key("s", "a"));
        profile.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nb=2\n");
    }

    #[test]
    fn test_save_marks_clean() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flag.ini");

        let mut profile = Profile::create(&path);
        profile.write_value("s", "k", "v").unwrap();
        assert!(profile.document().is_dirty());
        profile.save().unwrap();
        assert!(!profile.document().is_dirty());
    }
}
