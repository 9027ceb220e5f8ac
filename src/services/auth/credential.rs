use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::{error::Error as StdError, fmt};

// Errors returned by credential signing/verification.
#[derive(Debug)]
pub enum CredentialError {
    Jwt(jsonwebtoken::errors::Error),
    EmptyEmail,
    // issue time + ttl does not fit in a timestamp
    ExpiryOutOfRange,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt error: {}", e),
            Self::EmptyEmail => write!(f, "empty 'email' claim"),
            Self::ExpiryOutOfRange => write!(f, "credential expiry is out of range"),
        }
    }
}

impl StdError for CredentialError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for CredentialError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Claims carried by the `token` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed credential and its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// HS256 signer/verifier keyed by the process-wide secret.
///
/// - Key material is not printable via Debug.
#[derive(Clone)]
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialService")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl CredentialService {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is checked by jsonwebtoken; iat/email presence by serde.
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    pub fn issue(&self, email: &str) -> Result<IssuedCredential, CredentialError> {
        self.issue_at(email, Utc::now())
    }

    /// Sign a credential as if it had been issued at `issued_at`.
    pub fn issue_at(
        &self,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedCredential, CredentialError> {
        // signed as given: verify must hand back exactly this email
        if email.trim().is_empty() {
            return Err(CredentialError::EmptyEmail);
        }

        let expires_at = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or(CredentialError::ExpiryOutOfRange)?;
        let claims = CredentialClaims {
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;

        Ok(IssuedCredential { token, expires_at })
    }

    /// Verify signature and expiry, then return the claims.
    pub fn verify(&self, token: &str) -> Result<CredentialClaims, CredentialError> {
        let data =
            jsonwebtoken::decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.email.trim().is_empty() {
            return Err(CredentialError::EmptyEmail);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TOKEN_TTL_SECONDS;

    fn service() -> CredentialService {
        CredentialService::new(b"unit-test-secret", DEFAULT_TOKEN_TTL_SECONDS)
    }

    #[test]
    fn issued_credential_verifies_to_same_email() {
        let svc = service();
        for email in ["a@x.com", "someone.else+tag@example.org"] {
            let issued = svc.issue(email).unwrap();
            let claims = svc.verify(&issued.token).unwrap();
            assert_eq!(claims.email, email);
        }
    }

    #[test]
    fn expiry_is_one_year_after_issue() {
        let svc = service();
        let now = Utc::now();
        let issued = svc.issue_at("a@x.com", now).unwrap();
        let claims = svc.verify(&issued.token).unwrap();

        assert_eq!(claims.exp - claims.iat, 365 * 24 * 60 * 60);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn credential_older_than_window_is_rejected() {
        let svc = service();
        let issued_at = Utc::now() - ChronoDuration::days(366);
        let issued = svc.issue_at("a@x.com", issued_at).unwrap();

        let err = svc.verify(&issued.token).unwrap_err();
        assert!(matches!(err, CredentialError::Jwt(_)));
    }

    #[test]
    fn credential_signed_with_other_secret_is_rejected() {
        let other = CredentialService::new(b"another-secret", DEFAULT_TOKEN_TTL_SECONDS);
        let issued = other.issue("a@x.com").unwrap();

        assert!(service().verify(&issued.token).is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        let svc = service();
        assert!(svc.verify("").is_err());
        assert!(svc.verify("not.a.jwt").is_err());
    }

    #[test]
    fn email_is_signed_verbatim() {
        let svc = service();
        let issued = svc.issue("a@x.com ").unwrap();
        assert_eq!(svc.verify(&issued.token).unwrap().email, "a@x.com ");
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        for ttl in [10_000_000_000_000_000, u64::MAX] {
            let svc = CredentialService::new(b"unit-test-secret", ttl);
            assert!(matches!(
                svc.issue("a@x.com"),
                Err(CredentialError::ExpiryOutOfRange)
            ));
        }
    }

    #[test]
    fn blank_email_is_not_signed() {
        assert!(matches!(
            service().issue("   "),
            Err(CredentialError::EmptyEmail)
        ));
    }
}
