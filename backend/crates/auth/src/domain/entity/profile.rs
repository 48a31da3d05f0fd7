//! Profile Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, display_name::DisplayName, handle::Handle,
};

/// Public profile, one per account.
#[derive(Debug, Clone)]
pub struct Profile {
    pub account_id: AccountId,
    pub display_name: DisplayName,
    /// Unique across all profiles
    pub handle: Handle,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(account_id: AccountId, display_name: DisplayName, handle: Handle) -> Self {
        Self {
            account_id,
            display_name,
            handle,
            created_at: Utc::now(),
        }
    }
}
