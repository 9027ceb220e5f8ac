/*
 * Responsibility
 * - /jwt, /logout の request/response DTO
 */
use serde::{Deserialize, Serialize};

/// Body of `POST /jwt`. Extra fields sent by the client are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

impl TokenRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("email is required");
        }
        // owner-match compares emails byte for byte
        if self.email.trim() != self.email {
            return Err("email must not have surrounding whitespace");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(email: &str) -> TokenRequest {
        TokenRequest {
            email: email.to_string(),
        }
    }

    #[test]
    fn email_is_taken_as_is() {
        assert!(req("a@x.com").validate().is_ok());
        assert_eq!(req("  ").validate(), Err("email is required"));
        assert_eq!(
            req("a@x.com ").validate(),
            Err("email must not have surrounding whitespace")
        );
    }
}
