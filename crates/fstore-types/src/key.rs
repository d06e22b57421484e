//! Key validation.
//!
//! Keys are `/`-delimited hierarchical names that map one-to-one onto paths
//! below a store's base directory. Valid keys:
//! - Must be non-empty
//! - Must contain at least one non-empty segment (`"/"` alone names the root)
//! - Must not contain NUL
//! - Must not contain a `.` or `..` segment
//!
//! Empty segments (leading, trailing, or doubled `/`) are tolerated; the path
//! mapper drops them.

use serde::Serialize;

use crate::error::ValidationError;
use crate::nil::is_nil;

/// Separator between key segments.
pub const KEY_SEPARATOR: char = '/';

/// Characters that are forbidden anywhere in a key.
const FORBIDDEN_CHARS: &[char] = &['\0'];

/// Validate a key, returning `Ok(())` if it may be used for a single value.
///
/// # Examples
///
/// ```
/// use fstore_types::check_key;
///
/// assert!(check_key("deployments/app/status").is_ok());
/// assert!(check_key("").is_err());
/// assert!(check_key("a/../b").is_err());
/// ```
pub fn check_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    }
    check_segments(key)?;
    if key.split(KEY_SEPARATOR).all(str::is_empty) {
        return Err(invalid(key, "key must name something below the store root"));
    }
    Ok(())
}

/// Validate a prefix key used for listing.
///
/// Unlike [`check_key`], the empty prefix (and `"/"`) is accepted and names
/// the store root.
pub fn check_prefix(prefix: &str) -> Result<(), ValidationError> {
    check_segments(prefix)
}

/// Validate a key together with the value about to be stored under it.
///
/// A value is nil when it serializes to nothing at all: `None`, `()` or a
/// unit struct. Non-finite floats and empty collections are values.
pub fn check_key_and_value<V>(key: &str, value: &V) -> Result<(), ValidationError>
where
    V: Serialize + ?Sized,
{
    check_key(key)?;
    if is_nil(value) {
        return Err(ValidationError::NilValue {
            key: key.to_string(),
        });
    }
    Ok(())
}

fn check_segments(key: &str) -> Result<(), ValidationError> {
    for ch in FORBIDDEN_CHARS {
        if key.contains(*ch) {
            return Err(invalid(key, &format!("contains forbidden character: {ch:?}")));
        }
    }

    for segment in key.split(KEY_SEPARATOR) {
        if segment == "." || segment == ".." {
            return Err(invalid(key, &format!("must not contain a {segment:?} segment")));
        }
    }

    Ok(())
}

fn invalid(key: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
