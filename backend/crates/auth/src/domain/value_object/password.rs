//! Password Value Objects
//!
//! Thin domain wrappers over `platform::password`. No strength policy is
//! applied: any string, including the empty one, is hashed as given.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::password::{PasswordDigest, RawPassword};
//!
//! let raw = RawPassword::new("correct horse battery staple");
//! let digest = PasswordDigest::from_raw(&raw, None)?;
//! assert!(digest.verify(&raw, None));
//! # Ok::<(), kernel::error::app_error::AppError>(())
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

/// Password exactly as submitted. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored Argon2id digest (PHC string).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(HashedPassword);

impl PasswordDigest {
    /// Hash a raw password. CPU-heavy; callers on the async runtime should
    /// run this on the blocking pool.
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AppError::internal("Invalid password hash in database"))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification. A mismatch and a malformed digest both
    /// yield `false`.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &"[HASH]")
            .finish()
    }
}
