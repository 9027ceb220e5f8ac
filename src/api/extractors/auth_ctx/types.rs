/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が cookie を検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - email の一致チェック (owner-match) は api::policy 側で行う
 * - リクエスト 1 回分だけ生きる (永続化しない)
 */

/// 認証済みのリクエストに付与されるコンテキスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub email: String,
}

impl AuthCtx {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
