//! Session Refresh Middleware
//!
//! Resolves the session cookie once per request, attaches [`AuthLocals`] to
//! the request extensions and writes back at most one session cookie.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::RefreshSessionUseCase;
use crate::application::session_authority::SessionAuthority;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

pub async fn refresh_session<A, S>(
    State(state): State<AuthAppState<A, S>>,
    jar: axum_extra::extract::cookie::CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    A: Send + Sync + 'static,
    S: SessionAuthority + Send + Sync + 'static,
{
    let use_case = RefreshSessionUseCase::new(state.authority.clone());
    let (jar, locals) = use_case.execute(jar).await?;

    req.extensions_mut().insert(locals);

    let response = next.run(req).await;

    // sign-in, sign-up and sign-out set the cookie themselves; theirs wins
    if sets_cookie(&response, state.authority.cookie_name()) {
        return Ok(response);
    }

    Ok((jar, response).into_response())
}

fn sets_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| {
            value
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('='))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_sets_cookie_matches_exact_name() {
        let mut response = Response::new(axum::body::Body::empty());
        response.headers_mut().append(
            SET_COOKIE,
            HeaderValue::from_static("auth_session_hint=1; Path=/"),
        );
        assert!(!sets_cookie(&response, "auth_session"));

        response
            .headers_mut()
            .append(SET_COOKIE, HeaderValue::from_static("auth_session=; Max-Age=0"));
        assert!(sets_cookie(&response, "auth_session"));
    }
}
