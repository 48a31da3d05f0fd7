//! AccountId Value Object
//!
//! Accounts are identified by a 21-character URL-safe nanoid.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::account_id::AccountId;
//!
//! let id = AccountId::new();
//! assert_eq!(id.as_str().len(), 21);
//! ```
use std::str::FromStr;

use kernel::error::app_error::{AppError, AppResult};
use nid::Nanoid;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Nanoid);

impl AccountId {
    #[inline]
    pub fn new() -> Self {
        Self(Nanoid::new())
    }

    #[inline]
    pub fn parse_str(s: &str) -> AppResult<Self> {
        Nanoid::from_str(s)
            .map(AccountId)
            .map_err(|e| AppError::bad_request(format!("Invalid account id: {}", e)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for AccountId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        AccountId::parse_str(s)
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}
