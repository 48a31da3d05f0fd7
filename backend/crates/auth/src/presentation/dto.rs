//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::locals::AuthLocals;
use crate::domain::entity::{account::Account, profile::Profile};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub handle: String,
}

/// Created account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub handle: String,
}

impl AccountResponse {
    pub fn new(account: &Account, profile: &Profile) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.to_string(),
            display_name: profile.display_name.to_string(),
            handle: profile.handle.to_string(),
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Session Status
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub id: String,
    pub email: String,
}

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user: Option<SessionUserResponse>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&AuthLocals> for SessionStatusResponse {
    fn from(locals: &AuthLocals) -> Self {
        Self {
            authenticated: locals.is_authenticated(),
            user: locals.user.as_ref().map(|user| SessionUserResponse {
                id: user.id.to_string(),
                email: user.email.to_string(),
            }),
            expires_at: locals.session.as_ref().map(|session| session.expires_at),
        }
    }
}
