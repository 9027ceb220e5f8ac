use axum::http::{HeaderValue, header::InvalidHeaderValue};
use thiserror::Error;

use crate::services::auth::{
    cookie::CookiePolicy,
    credential::{CredentialClaims, CredentialError, CredentialService},
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("cookie header: {0}")]
    Cookie(#[from] InvalidHeaderValue),
}

/// Issuer + verifier for the `token` cookie.
///
/// Built once at startup and shared read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct AuthService {
    credentials: CredentialService,
    cookies: CookiePolicy,
}

impl AuthService {
    pub fn new(credentials: CredentialService, cookies: CookiePolicy) -> Self {
        Self {
            credentials,
            cookies,
        }
    }

    /// Sign a credential for `email` and wrap it in a `Set-Cookie` value.
    pub fn login_cookie(&self, email: &str) -> Result<HeaderValue, AuthError> {
        let issued = self.credentials.issue(email)?;
        tracing::debug!(expires_at = %issued.expires_at, "credential issued");
        Ok(self.cookies.issue(&issued.token)?)
    }

    pub fn logout_cookie(&self) -> Result<HeaderValue, AuthError> {
        Ok(self.cookies.clear()?)
    }

    pub fn verify(&self, token: &str) -> Result<CredentialClaims, AuthError> {
        Ok(self.credentials.verify(token)?)
    }

    pub fn credentials(&self) -> &CredentialService {
        &self.credentials
    }
}
