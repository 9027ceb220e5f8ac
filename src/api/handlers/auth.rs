/*
 * Responsibility
 * - POST /jwt: email を受け取り、署名済み credential を `token` cookie で返す
 * - GET /logout: `token` cookie を消す (cookie がなくても成功)
 * - ここでは認証 (本人確認) はしない。外部 IdP でのログイン後に呼ばれる前提
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::auth::{SuccessResponse, TokenRequest};
use crate::api::extractors::JsonBody;
use crate::error::AppError;
use crate::state::AppState;

pub async fn issue_token(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let cookie = state.auth.login_cookie(&req.email).map_err(|e| {
        tracing::error!(error = %e, "failed to issue credential");
        AppError::Internal
    })?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse::ok()),
    ))
}

pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cookie = state.auth.logout_cookie().map_err(|e| {
        tracing::error!(error = %e, "failed to build logout cookie");
        AppError::Internal
    })?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse::ok()),
    ))
}
