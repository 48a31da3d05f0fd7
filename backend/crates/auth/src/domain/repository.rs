//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::SessionId;

use crate::domain::entity::{
    account::NewAccount,
    profile::Profile,
    session::{Session, SessionUser},
};
use crate::domain::value_object::{
    account_id::AccountId, email::Email, handle::Handle, password::PasswordDigest,
};
use crate::error::AuthResult;

/// Criteria for [`AccountRepository::find_account`]. An account matches when
/// its profile handle equals `handle` OR its email equals `email`.
/// A lookup with neither criterion matches nothing.
#[derive(Debug, Clone, Default)]
pub struct AccountLookup {
    pub handle: Option<Handle>,
    pub email: Option<Email>,
}

impl AccountLookup {
    pub fn by_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
            email: None,
        }
    }

    pub fn by_email(email: Email) -> Self {
        Self {
            handle: None,
            email: Some(email),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none() && self.email.is_none()
    }
}

/// Which attributes to load besides the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountSelect {
    pub email: bool,
    pub password_hash: bool,
    pub profile: bool,
}

impl AccountSelect {
    /// Existence checks
    pub const ID_ONLY: Self = Self {
        email: false,
        password_hash: false,
        profile: false,
    };

    /// Sign-in verification
    pub const CREDENTIALS: Self = Self {
        email: false,
        password_hash: true,
        profile: false,
    };

    pub const ALL: Self = Self {
        email: true,
        password_hash: true,
        profile: true,
    };
}

/// Projection of an account as requested by an [`AccountSelect`].
/// Unrequested attributes are `None`.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: AccountId,
    pub email: Option<Email>,
    pub password_hash: Option<PasswordDigest>,
    pub profile: Option<Profile>,
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find at most one account matching `lookup`
    async fn find_account(
        &self,
        lookup: &AccountLookup,
        select: AccountSelect,
    ) -> AuthResult<Option<AccountRecord>>;

    /// Persist account, profile and default settings atomically.
    ///
    /// A unique violation on the handle or email surfaces as
    /// `HandleAlreadyInUse` / `EmailAlreadyInUse`.
    async fn create_account(&self, new_account: &NewAccount) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a new session
    async fn insert(&self, session: &Session) -> AuthResult<()>;

    /// Find session together with its account attributes
    async fn find_with_user(
        &self,
        session_id: &SessionId,
    ) -> AuthResult<Option<(Session, SessionUser)>>;

    /// Move a session's expiry
    async fn update_expiry(
        &self,
        session_id: &SessionId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Delete a session (no-op if missing)
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Delete every expired session, returning the count
    async fn delete_expired(&self) -> AuthResult<u64>;
}
