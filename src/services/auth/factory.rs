/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{
    AuthService, cookie::CookiePolicy, credential::CredentialService,
};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let credentials =
        CredentialService::new(config.jwt_secret.as_bytes(), config.token_ttl_seconds);
    let cookies = CookiePolicy::for_env(config.app_env, config.token_ttl_seconds);

    Arc::new(AuthService::new(credentials, cookies))
}
