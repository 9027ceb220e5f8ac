//! `token` cookie: build on login, clear on logout, read on every gated request.
//!
//! Flags:
//! - always `HttpOnly; Path=/`
//! - production: `Secure; SameSite=None` (the frontend is served from another site)
//! - development: `SameSite=Strict`, no `Secure` (plain http on localhost)

use axum::http::{HeaderMap, HeaderValue, header, header::InvalidHeaderValue};

use crate::config::AppEnv;

pub const TOKEN_COOKIE_NAME: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SameSite {
    Strict,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookiePolicy {
    secure: bool,
    same_site: SameSite,
    max_age_seconds: u64,
}

impl CookiePolicy {
    pub fn for_env(app_env: AppEnv, max_age_seconds: u64) -> Self {
        if app_env.is_production() {
            Self {
                secure: true,
                same_site: SameSite::None,
                max_age_seconds,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
                max_age_seconds,
            }
        }
    }

    /// `Set-Cookie` value carrying the credential.
    pub fn issue(&self, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let cookie = format!(
            "{TOKEN_COOKIE_NAME}={token}; Path=/; HttpOnly; Max-Age={}{}",
            self.max_age_seconds,
            self.attributes()
        );
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` value that makes the browser drop the credential.
    pub fn clear(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let cookie = format!(
            "{TOKEN_COOKIE_NAME}=; Path=/; HttpOnly; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT{}",
            self.attributes()
        );
        HeaderValue::from_str(&cookie)
    }

    fn attributes(&self) -> String {
        let mut attrs = format!("; SameSite={}", self.same_site.as_str());
        if self.secure {
            attrs.push_str("; Secure");
        }
        attrs
    }
}

/// Read the credential from the request's `Cookie` headers.
///
/// An empty value (what a cleared cookie looks like) counts as absent.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == TOKEN_COOKIE_NAME).then(|| val.trim().to_string())
        })
        .find(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for c in cookies {
            headers.append(header::COOKIE, HeaderValue::from_str(c).unwrap());
        }
        headers
    }

    #[test]
    fn production_cookie_is_secure_and_cross_site() {
        let policy = CookiePolicy::for_env(AppEnv::Production, 60);
        let value = policy.issue("abc").unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("token=abc;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Secure"));
        assert!(value.contains("SameSite=None"));
        assert!(value.contains("Max-Age=60"));
    }

    #[test]
    fn development_cookie_is_strict_without_secure() {
        let policy = CookiePolicy::for_env(AppEnv::Development, 60);
        let value = policy.issue("abc").unwrap();
        let value = value.to_str().unwrap();

        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Strict"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn clearing_cookie_keeps_flags_and_zero_lifetime() {
        let policy = CookiePolicy::for_env(AppEnv::Production, 60);
        let value = policy.clear().unwrap();
        let value = value.to_str().unwrap();

        assert!(value.starts_with("token=;"));
        assert!(value.contains("Max-Age=0"));
        assert!(value.contains("Secure"));
        assert!(value.contains("SameSite=None"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let headers = headers_with(&["theme=dark; token=abc.def.ghi; lang=en"]);
        assert_eq!(extract_token(&headers).as_deref(), Some("abc.def.ghi"));

        let headers = headers_with(&["theme=dark", "token=xyz"]);
        assert_eq!(extract_token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn missing_or_empty_token_is_absent() {
        assert!(extract_token(&HeaderMap::new()).is_none());
        assert!(extract_token(&headers_with(&["token="])).is_none());
        assert!(extract_token(&headers_with(&["tokens=abc; xtoken=abc"])).is_none());
    }
}
