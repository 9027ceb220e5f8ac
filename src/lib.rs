/*
 * Responsibility
 * - crate の公開モジュール (bin と tests/ から共通利用)
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
