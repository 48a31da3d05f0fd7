//! Handle Value Object
//!
//! A handle is the URL-safe public identifier of a profile. It is never
//! chosen freely: it is derived from the display name, and a sign-up request
//! must echo exactly the handle the display name produces.
//!
//! ## Derivation
//! - NFKD decomposition, then anything outside ASCII is dropped
//!   (`"Zoë"` becomes `"zoe"`)
//! - ASCII letters are lowercased, digits are kept
//! - whitespace, `-`, `.` and `_` become a single `_`
//! - every other character is dropped
//! - no leading or trailing `_`, at most 30 characters

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const HANDLE_MAX_LENGTH: usize = 30;

const SEPARATOR: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Derive the canonical handle for a display name.
    pub fn derive(display_name: &str) -> Self {
        let mut handle = String::with_capacity(display_name.len());

        for ch in display_name.nfkd() {
            let mapped = match ch {
                c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
                c if c.is_whitespace() || matches!(c, '_' | '-' | '.') => SEPARATOR,
                _ => continue,
            };

            if mapped == SEPARATOR && (handle.is_empty() || handle.ends_with(SEPARATOR)) {
                continue;
            }
            handle.push(mapped);
        }

        // ASCII only at this point, byte truncation is char-safe
        handle.truncate(HANDLE_MAX_LENGTH);
        while handle.ends_with(SEPARATOR) {
            handle.pop();
        }

        Self(handle)
    }

    /// Exact, case-sensitive comparison against a client-supplied handle.
    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Create from database value (assumed already derived)
    pub fn from_db(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
