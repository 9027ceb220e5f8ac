/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: cookie の JWT 検証 (gate)
 * - cors / http: Router 全体に掛ける横断的な layer
 */
pub mod auth;
pub mod cors;
pub mod http;
