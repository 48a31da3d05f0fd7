//! Per-request authentication state

use crate::application::session_authority::ValidatedSession;
use crate::domain::entity::session::{Session, SessionUser};

/// Attached to every request by the session refresh middleware.
/// Both fields are `Some` or both are `None`.
#[derive(Debug, Clone, Default)]
pub struct AuthLocals {
    pub user: Option<SessionUser>,
    pub session: Option<Session>,
}

impl AuthLocals {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(validated: ValidatedSession) -> Self {
        Self {
            user: Some(validated.user),
            session: Some(validated.session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.session.is_some()
    }
}
