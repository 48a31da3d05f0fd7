//! Session Entity
//!
//! A server-side session record. The client only ever holds a signed
//! reference to [`Session::id`].
//!
//! ## Expiry policy
//! Sessions live for a fixed TTL. Once less than half of the TTL remains,
//! validating the session slides `expires_at` to `now + ttl` and marks it
//! fresh so the cookie is re-issued with the new lifetime.

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::SessionId;

use crate::domain::value_object::{account_id::AccountId, email::Email};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
    /// Set when the session was created or extended during this request.
    /// Not persisted.
    pub fresh: bool,
}

impl Session {
    /// Create a new session. New sessions are always fresh.
    pub fn new(account_id: AccountId, ttl: TimeDelta) -> Self {
        Self {
            id: SessionId::new(),
            account_id,
            expires_at: expiry_from(Utc::now(), ttl),
            fresh: true,
        }
    }

    /// Rebuild a stored session (never fresh)
    pub fn from_db(id: SessionId, account_id: AccountId, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            account_id,
            expires_at,
            fresh: false,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True once less than half of `ttl` remains
    pub fn needs_extension_at(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.expires_at - now < ttl / 2
    }

    pub fn extend(&mut self, now: DateTime<Utc>, ttl: TimeDelta) {
        self.expires_at = expiry_from(now, ttl);
        self.fresh = true;
    }
}

/// `now + ttl`, saturating at the latest representable instant
fn expiry_from(now: DateTime<Utc>, ttl: TimeDelta) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Account attributes resolved alongside a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: AccountId,
    pub email: Email,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttl() -> TimeDelta {
        TimeDelta::days(30)
    }

    #[test]
    fn test_new_session_is_fresh() {
        let session = Session::new(AccountId::new(), ttl());
        let now = Utc::now();
        assert!(session.fresh);
        assert!(!session.is_expired_at(now));
        assert!(!session.needs_extension_at(now, ttl()));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = Session::from_db(SessionId::new(), AccountId::new(), now);
        assert!(session.is_expired_at(now));
        assert!(!session.is_expired_at(now - TimeDelta::seconds(1)));
    }

    #[test]
    fn test_extension_window() {
        let now = Utc::now();
        let mut session =
            Session::from_db(SessionId::new(), AccountId::new(), now + TimeDelta::days(10));
        assert!(!session.fresh);
        assert!(session.needs_extension_at(now, ttl()));

        session.extend(now, ttl());
        assert!(session.fresh);
        assert_eq!(session.expires_at, now + ttl());
        assert!(!session.needs_extension_at(now, ttl()));

        let settled =
            Session::from_db(SessionId::new(), AccountId::new(), now + TimeDelta::days(20));
        assert!(!settled.needs_extension_at(now, ttl()));
    }

    #[test]
    fn test_oversized_ttl_saturates() {
        let session = Session::new(AccountId::new(), TimeDelta::MAX);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);

        let mut session = Session::from_db(SessionId::new(), AccountId::new(), Utc::now());
        session.extend(Utc::now(), TimeDelta::MAX);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
    }
}
