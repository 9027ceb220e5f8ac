/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: Arc<dyn Store>, id_codec: IdCodec, auth: AuthService
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 起動時に一度だけ作る。リクエスト間で共有するのは読み取り専用の値と store ハンドルのみ
 */
use std::sync::Arc;

use crate::repos::Store;
use crate::services::{auth::AuthService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, id_codec: IdCodec, auth: Arc<AuthService>) -> Self {
        Self {
            store,
            id_codec,
            auth,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("id_codec", &self.id_codec)
            .field("auth", &self.auth)
            .finish()
    }
}
