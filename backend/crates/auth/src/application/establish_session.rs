//! Establish Session
//!
//! Shared tail of sign-up and sign-in: create a session for the account and
//! queue its cookie on the outgoing jar.

use axum_extra::extract::cookie::CookieJar;

use crate::application::session_authority::SessionAuthority;
use crate::domain::value_object::account_id::AccountId;
use crate::error::AuthResult;

/// Create a session for `account_id` and add its cookie to `jar`.
///
/// Exactly one `Set-Cookie` is produced. If session creation fails the jar
/// is dropped untouched.
pub async fn establish_session<S>(
    authority: &S,
    account_id: &AccountId,
    jar: CookieJar,
) -> AuthResult<CookieJar>
where
    S: SessionAuthority + Sync,
{
    let session = authority.create_session(account_id).await?;
    let cookie = authority.session_cookie(&session).into_cookie();
    Ok(jar.add(cookie))
}
