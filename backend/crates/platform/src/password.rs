//! Credential Hashing
//!
//! One-way password hashing with Argon2id and process-wide cost parameters:
//! - memory cost 19456 KiB, time cost 2, parallelism 1, 32-byte output
//! - random 128-bit salt per hash, PHC string output
//! - optional pepper, fed to Argon2 as its secret input
//! - zeroization of clear text passwords on drop
//!
//! Verification never errors for a digest: a mismatch or an unparsable
//! digest is simply `false`.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Memory cost in KiB (19 MiB)
pub const MEMORY_COST_KIB: u32 = 19_456;

/// Number of passes
pub const TIME_COST: u32 = 2;

/// Degree of parallelism
pub const PARALLELISM: u32 = 1;

/// Raw hash output length in bytes
pub const OUTPUT_LEN: usize = 32;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` output is redacted.
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse battery staple");
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap user input. The bytes are hashed exactly as given.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = hasher(pepper)?;

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id digest in PHC string format
///
/// The PHC string embeds algorithm, version, parameters and salt, so a
/// digest stays verifiable even if the constants above change later.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this digest
    ///
    /// `pepper` must match the one used during hashing. Comparison is
    /// constant-time inside argon2.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };
        let Ok(argon2) = hasher(pepper) else {
            return false;
        };

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn hasher(pepper: Option<&[u8]>) -> Result<Argon2<'_>, PasswordHashError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    match pepper {
        Some(secret) => Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, params)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string())),
        None => Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));

        let wrong_password = ClearTextPassword::new("WrongPassword123!");
        assert!(!hashed.verify(&wrong_password, None));
    }

    #[test]
    fn test_hash_uses_fixed_parameters() {
        let hashed = ClearTextPassword::new("hunter2").hash(None).unwrap();
        assert!(
            hashed
                .as_phc_string()
                .starts_with("$argon2id$v=19$m=19456,t=2,p=1$")
        );
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let password = ClearTextPassword::new("same input");
        let first = password.hash(None).unwrap();
        let second = password.hash(None).unwrap();
        assert_ne!(first.as_phc_string(), second.as_phc_string());
    }

    #[test]
    fn test_empty_and_unicode_passwords() {
        for raw in ["", "パスワード安全です!", " padded "] {
            let password = ClearTextPassword::new(raw);
            let hashed = password.hash(None).unwrap();
            assert!(hashed.verify(&password, None));
        }

        // No normalization: visually similar inputs are different passwords
        let hashed = ClearTextPassword::new(" padded ").hash(None).unwrap();
        assert!(!hashed.verify(&ClearTextPassword::new("padded"), None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("TestPassword123!");
        let pepper = b"my_secret_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!");
        let hashed = password.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_digest_with_other_parameters_still_verifies() {
        let weak = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(8, 1, 1, None).unwrap(),
        );
        let salt = SaltString::generate(&mut OsRng);
        let phc = weak.hash_password(b"pw", &salt).unwrap().to_string();

        let hashed = HashedPassword::from_phc_string(phc).unwrap();
        assert!(hashed.verify(&ClearTextPassword::new("pw"), None));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret");
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = password.hash(None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2id"));
    }
}
