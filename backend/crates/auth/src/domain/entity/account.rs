//! Account Entity
//!
//! Login identity: email plus password digest. Public-facing data lives on
//! the [`Profile`](super::profile::Profile).

use chrono::{DateTime, Utc};

use crate::domain::entity::profile::Profile;
use crate::domain::value_object::{
    account_id::AccountId, display_name::DisplayName, email::Email, handle::Handle,
    password::PasswordDigest,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: Email,
    pub password_hash: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: Email, password_hash: PasswordDigest) -> Self {
        Self {
            id: AccountId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Everything written when an account is registered. The account, its
/// profile and the default settings rows are persisted as one unit.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub account: Account,
    pub profile: Profile,
}

impl NewAccount {
    pub fn new(
        email: Email,
        password_hash: PasswordDigest,
        display_name: DisplayName,
        handle: Handle,
    ) -> Self {
        let account = Account::new(email, password_hash);
        let profile = Profile::new(account.id, display_name, handle);
        Self { account, profile }
    }
}
