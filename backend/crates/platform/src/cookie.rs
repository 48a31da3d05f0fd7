//! Cookie Management Infrastructure
//!
//! A session authority describes its cookie as name, value and attributes.
//! [`SessionCookie::into_cookie`] materializes that description into an
//! `axum_extra` cookie, scoped to the application root unless the
//! attributes name another path.

use axum_extra::extract::cookie::{Cookie, SameSite as CookieSameSite};

/// Path every session cookie is scoped to by default
pub const ROOT_PATH: &str = "/";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    fn to_cookie_same_site(self) -> CookieSameSite {
        match self {
            SameSite::Strict => CookieSameSite::Strict,
            SameSite::Lax => CookieSameSite::Lax,
            SameSite::None => CookieSameSite::None,
        }
    }
}

/// Cookie attributes chosen by the session authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    /// Overrides [`ROOT_PATH`] when set
    pub path: Option<String>,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self {
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
            path: None,
            max_age_secs: None,
        }
    }
}

/// Cookie description: name, value and attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

impl SessionCookie {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        attributes: CookieAttributes,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            attributes,
        }
    }

    /// Empty, immediately expiring cookie that clears the client's copy
    pub fn blank(name: impl Into<String>, attributes: CookieAttributes) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            attributes: CookieAttributes {
                max_age_secs: Some(0),
                ..attributes
            },
        }
    }

    /// Build the response cookie, with `path` defaulting to [`ROOT_PATH`]
    pub fn into_cookie(self) -> Cookie<'static> {
        let path = self
            .attributes
            .path
            .unwrap_or_else(|| ROOT_PATH.to_string());

        let mut builder = Cookie::build((self.name, self.value))
            .path(path)
            .http_only(self.attributes.http_only)
            .secure(self.attributes.secure)
            .same_site(self.attributes.same_site.to_cookie_same_site());

        if let Some(max_age) = self.attributes.max_age_secs {
            builder = builder.max_age(time::Duration::seconds(max_age));
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_cookie_defaults_to_root_path() {
        let cookie = SessionCookie::new(
            "auth_session",
            "abc.def",
            CookieAttributes {
                max_age_secs: Some(3600),
                ..Default::default()
            },
        )
        .into_cookie();

        assert_eq!(cookie.name(), "auth_session");
        assert_eq!(cookie.value(), "abc.def");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(CookieSameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
    }

    #[test]
    fn test_attribute_path_overrides_root() {
        let cookie = SessionCookie::new(
            "auth_session",
            "v",
            CookieAttributes {
                path: Some("/app".to_string()),
                ..Default::default()
            },
        )
        .into_cookie();

        assert_eq!(cookie.path(), Some("/app"));
    }

    #[test]
    fn test_blank_cookie_expires_immediately() {
        let attributes = CookieAttributes {
            secure: false,
            same_site: SameSite::Strict,
            max_age_secs: Some(86_400),
            ..Default::default()
        };
        let blank = SessionCookie::blank("auth_session", attributes);
        assert!(blank.value.is_empty());
        assert_eq!(blank.attributes.max_age_secs, Some(0));

        let header = blank.into_cookie().to_string();
        assert!(header.starts_with("auth_session=;"));
        assert!(header.contains("Max-Age=0"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.contains("Path=/"));
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_same_site_maps_to_cookie_attribute() {
        for (same_site, expected) in [
            (SameSite::Strict, CookieSameSite::Strict),
            (SameSite::default(), CookieSameSite::Lax),
            (SameSite::None, CookieSameSite::None),
        ] {
            let attributes = CookieAttributes {
                same_site,
                ..Default::default()
            };
            let cookie = SessionCookie::new("auth_session", "v", attributes).into_cookie();
            assert_eq!(cookie.same_site(), Some(expected));
        }
    }
}
