/*
 * Responsibility
 * - owner-match: リクエストで宣言された email (path / query / body) と
 *   認証済み email (AuthCtx) の完全一致チェック
 * - 読み取り / 書き込みに関わらず、ユーザー単位のデータを扱う handler は
 *   store に触る前に必ずこれを通す
 */
use crate::api::extractors::AuthCtx;
use crate::error::AppError;

/// Exact string equality between the declared and the authenticated email.
pub fn require_owner(ctx: &AuthCtx, declared_email: &str) -> Result<(), AppError> {
    if ctx.email == declared_email {
        return Ok(());
    }

    tracing::warn!(
        authenticated = %ctx.email,
        declared = %declared_email,
        "owner mismatch"
    );
    Err(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_email_passes() {
        let ctx = AuthCtx::new("a@x.com");
        assert!(require_owner(&ctx, "a@x.com").is_ok());
    }

    #[test]
    fn any_difference_is_unauthorized() {
        let ctx = AuthCtx::new("a@x.com");
        for declared in ["b@x.com", "A@x.com", "a@x.com ", ""] {
            assert!(matches!(
                require_owner(&ctx, declared),
                Err(AppError::Unauthorized)
            ));
        }
    }
}
