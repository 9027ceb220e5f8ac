/*
 * Responsibility
 * - 環境変数や設定の読み込み (SECRET_KEY, DATABASE_URL, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 起動時に一度だけ組み立て、以降は参照で渡す (グローバルには置かない)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// 365 days.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;
/// 10 years.
pub const MAX_TOKEN_TTL_SECONDS: u64 = 10 * DEFAULT_TOKEN_TTL_SECONDS;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_SQIDS_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // None -> in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: String,
    pub token_ttl_seconds: u64,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub request_timeout_seconds: u64,
    pub body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret or database credentials
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("body_limit_bytes", &self.body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map instead of mutating
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", &lookup, 5)?;

        let mut cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if cors_allowed_origins.is_empty() {
            cors_allowed_origins.push(DEFAULT_CORS_ORIGIN.to_string());
        }

        let jwt_secret = lookup("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("SECRET_KEY"));
        }

        let token_ttl_seconds: u64 =
            parse_or("TOKEN_TTL_SECONDS", &lookup, DEFAULT_TOKEN_TTL_SECONDS)?;
        if token_ttl_seconds == 0 || token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"));
        }

        let sqids_min_length = parse_or("SQIDS_MIN_LENGTH", &lookup, 10)?;
        let sqids_alphabet =
            lookup("SQIDS_ALPHABET").unwrap_or_else(|| DEFAULT_SQIDS_ALPHABET.to_string());

        let request_timeout_seconds = parse_or("REQUEST_TIMEOUT_SECONDS", &lookup, 30)?;
        let body_limit_bytes = parse_or("BODY_LIMIT_BYTES", &lookup, 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            cors_allowed_origins,
            jwt_secret,
            token_ttl_seconds,
            sqids_min_length,
            sqids_alphabet,
            request_timeout_seconds,
            body_limit_bytes,
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("SECRET_KEY", "s3cret")])).unwrap();

        assert_eq!(config.addr.port(), 5000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.database_url.is_none());
        assert_eq!(config.token_ttl_seconds, DEFAULT_TOKEN_TTL_SECONDS);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SECRET_KEY"));

        let err = Config::from_lookup(lookup_from(&[("SECRET_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Invalid("SECRET_KEY"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("SECRET_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn production_env_and_origins_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("SECRET_KEY", "k"),
            ("APP_ENV", "PROD"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,,"),
            ("DATABASE_URL", "postgres://localhost/dine"),
        ]))
        .unwrap();

        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/dine")
        );
    }

    #[test]
    fn token_ttl_must_be_within_bounds() {
        for raw in ["0", "315360001", "10000000000000000", "18446744073709551615"] {
            let err = Config::from_lookup(lookup_from(&[
                ("SECRET_KEY", "k"),
                ("TOKEN_TTL_SECONDS", raw),
            ]))
            .unwrap_err();
            assert_eq!(err, ConfigError::Invalid("TOKEN_TTL_SECONDS"), "{raw}");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("SECRET_KEY", "k"),
            ("TOKEN_TTL_SECONDS", "315360000"),
        ]))
        .unwrap();
        assert_eq!(config.token_ttl_seconds, MAX_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&[("SECRET_KEY", "do-not-print")])).unwrap();
        assert!(!format!("{config:?}").contains("do-not-print"));
    }
}
