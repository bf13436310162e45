/*
 * Responsibility
 * - Load settings from the environment (.env is honoured in development)
 * - Validate values up front so a misconfigured process never starts serving
 * - Hand the auth gate its own AuthConfig instead of ambient globals
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::AuthConfig;

const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
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

/// Process-wide settings. Secrets are kept out of `Debug`.
#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // None => in-memory user store
    pub database_url: Option<String>,
    // Promoted to admin at startup (there is no other way to get the first admin)
    pub bootstrap_admin_emails: Vec<String>,

    pub auth_issuer: String,
    pub access_token_secret: String,
    pub access_token_ttl_seconds: u64,
    pub access_token_leeway_seconds: u64,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("bootstrap_admin_emails", &self.bootstrap_admin_emails)
            .field("auth_issuer", &self.auth_issuer)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("request_timeout", &self.request_timeout)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in `from_env`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = lookup("APP_ENV")
            .map(|raw| AppEnv::parse(&raw))
            .unwrap_or(AppEnv::Development);

        let cors_allowed_origins = split_list(lookup("CORS_ALLOWED_ORIGINS"));
        let bootstrap_admin_emails = split_list(lookup("BOOTSTRAP_ADMIN_EMAILS"));

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let auth_issuer = lookup("AUTH_ISSUER")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "booking-api".to_string());

        let access_token_secret = lookup("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;

        if app_env.is_production() && access_token_secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_SECRET"));
        }

        let access_token_ttl_seconds = parse_or(&lookup, "ACCESS_TOKEN_TTL_SECONDS", 3600)?;
        if access_token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
        }

        let access_token_leeway_seconds = parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 0)?;

        let request_timeout =
            Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECONDS", 30)?);

        let request_body_limit_bytes =
            parse_or(&lookup, "REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)? as usize;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            database_url,
            bootstrap_admin_emails,
            auth_issuer,
            access_token_secret,
            access_token_ttl_seconds,
            access_token_leeway_seconds,
            request_timeout,
            request_body_limit_bytes,
        })
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig::new(self.access_token_secret.as_bytes())
            .with_issuer(self.auth_issuer.clone())
            .with_ttl_seconds(self.access_token_ttl_seconds)
            .with_leeway_seconds(self.access_token_leeway_seconds)
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
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
        let config = Config::from_lookup(lookup_from(&[("ACCESS_TOKEN_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.database_url.is_none());
        assert!(config.bootstrap_admin_emails.is_empty());
        assert_eq!(config.auth_issuer, "booking-api");
        assert_eq!(config.access_token_ttl_seconds, 3600);
        assert_eq!(config.access_token_leeway_seconds, 0);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn missing_secret_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("ACCESS_TOKEN_SECRET"));
    }

    #[test]
    fn production_rejects_short_secret() {
        let err = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "prod"),
            ("ACCESS_TOKEN_SECRET", "short"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("ACCESS_TOKEN_SECRET"));
    }

    #[test]
    fn invalid_numbers_are_reported_by_key() {
        let err = Config::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN_SECRET", "s3cret"),
            ("ACCESS_TOKEN_TTL_SECONDS", "an hour"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));

        let err = Config::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN_SECRET", "s3cret"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Invalid("PORT"));
    }

    #[test]
    fn cors_origins_are_trimmed_and_blank_entries_dropped() {
        let config = Config::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN_SECRET", "s3cret"),
            ("CORS_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
        ]))
        .unwrap();

        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("ACCESS_TOKEN_SECRET", "do-not-print-me"),
            ("DATABASE_URL", "postgres://user:pw@localhost/db"),
        ]))
        .unwrap();
        let printed = format!("{:?}", config);

        assert!(!printed.contains("do-not-print-me"));
        assert!(!printed.contains("pw@localhost"));
    }
}
