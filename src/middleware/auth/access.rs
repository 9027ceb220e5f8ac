//! `token` cookie 検証 → AuthCtx を extensions に入れる
//!
//! - cookie なし / 空 → 401 (handler は呼ばれない)
//! - 署名・期限・形式のどれかが不正 → 401
//! - 成功 → AuthCtx { email } を extensions に入れて次へ
//!
//! 401 の原因はレスポンスでは区別しない (ログにだけ残す)。
//! email の一致 (owner-match) は handler 側で api::policy を使って確認する。

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::cookie;
use crate::state::AppState;

/// 渡された Router の全 route に gate を掛ける。
///
/// `route_layer` なので、どの route にもマッチしないリクエストは 401 ではなく 404 のまま。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/add-food", post(add_food));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = cookie::extract_token(req.headers()) else {
        tracing::debug!("credential cookie missing");
        return Err(AppError::Unauthorized);
    };

    let claims = match state.auth.verify(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "credential verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(claims.email));

    Ok(next.run(req).await)
}
