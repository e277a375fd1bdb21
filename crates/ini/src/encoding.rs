//! UTF-8 validation and byte-order-mark handling
//!
//! Input is UTF-8, with a single leading BOM tolerated. Output never
//! carries a BOM. Validation errors report the byte offset of the first
//! invalid sequence.

use crate::error::{IniError, Result};

/// The UTF-8 byte-order mark as a char.
pub const BOM: char = '\u{feff}';

/// Validate that a byte slice is valid UTF-8.
///
/// Returns the validated string slice on success, or an
/// [`IniError::Utf8`] carrying the byte offset of the first invalid
/// sequence.
///
/// # Examples
///
/// ```
/// use ini::encoding::validate_utf8;
///
/// assert!(validate_utf8(b"[section]\nkey=value").is_ok());
///
/// // Invalid continuation byte at offset 5
/// let err = validate_utf8(&[b'H', b'e', b'l', b'l', b'o', 0x80]).unwrap_err();
/// ```
pub fn validate_utf8(bytes: &[u8]) -> Result<&str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => Err(IniError::Utf8 {
            offset: e.valid_up_to(),
        }),
    }
}

/// Strip one leading byte-order mark, if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}
