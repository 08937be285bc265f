//! HR service configuration

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in {1} environment")]
    MissingSecret(&'static str, String),

    #[error("{0} must not be empty in {1} environment")]
    EmptySecret(&'static str, String),

    #[error("{0} must be set when the postgres backend is selected")]
    Missing(&'static str),

    #[error("{name}: unknown backend '{value}' (expected postgres or memory)")]
    UnknownBackend { name: &'static str, value: String },
}

/// Where entities or sessions are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Memory,
}

impl FromStr for Backend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// HR service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP port
    pub http_port: u16,
    /// Entity store backend
    pub store_backend: Backend,
    /// Session store backend
    pub session_backend: Backend,
    /// PostgreSQL connection URL (required for the postgres backends)
    pub database_url: Option<String>,
    /// Login name of the bootstrap account
    pub default_user: String,
    /// Password every new employee receives
    pub default_password: String,
    /// Internal email suffix, e.g. `@holiday-parks.eu`
    pub email_domain: String,
    /// Identity-provider suffix rewritten to `email_domain` at login; empty disables the rewrite
    pub idp_email_suffix: String,
    /// Pool size upper bound
    pub db_max_connections: u32,
    /// Max lifetime (and idle timeout) of a pooled connection
    pub db_max_lifetime: Duration,
    /// Initial delay between store connection attempts
    pub db_connect_retry: Duration,
    /// Attempts before startup gives up on the store
    pub db_connect_max_attempts: u32,
    /// Login attempts per minute per client IP
    pub login_rate_limit: u32,
    /// Daily rotating log file directory
    pub log_dir: Option<String>,
}

impl Default for Config {
    /// Development configuration on the in-memory backends
    fn default() -> Self {
        Self {
            environment: "development".into(),
            http_port: 5000,
            store_backend: Backend::Memory,
            session_backend: Backend::Memory,
            database_url: None,
            default_user: "admin@holiday-parks.eu".into(),
            default_password: "Admin01!".into(),
            email_domain: "@holiday-parks.eu".into(),
            idp_email_suffix: "@fictproftaak03.onmicrosoft.com".into(),
            db_max_connections: 25,
            db_max_lifetime: Duration::from_secs(300),
            db_connect_retry: Duration::from_secs(5),
            db_connect_max_attempts: 10,
            login_rate_limit: 10,
            log_dir: None,
        }
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(
        name: &'static str,
        environment: &str,
        dev_fallback: &str,
    ) -> Result<String, ConfigError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(ConfigError::MissingSecret(name, environment.into()));
                }
                dev_fallback.to_string()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(ConfigError::EmptySecret(name, environment.into()));
        }
        Ok(val)
    }

    fn backend(name: &'static str, default: Backend) -> Result<Backend, ConfigError> {
        match std::env::var(name) {
            Ok(v) if !v.is_empty() => v
                .parse()
                .map_err(|_| ConfigError::UnknownBackend { name, value: v }),
            _ => Ok(default),
        }
    }

    fn parsed<T: FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let store_backend = Self::backend("STORE_BACKEND", Backend::Postgres)?;
        let session_backend = Self::backend("SESSION_BACKEND", store_backend)?;
        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if database_url.is_none()
            && (store_backend == Backend::Postgres || session_backend == Backend::Postgres)
        {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        Ok(Self {
            http_port: Self::parsed("HTTP_PORT", defaults.http_port),
            store_backend,
            session_backend,
            database_url,
            default_user: std::env::var("DEFAULT_USER").unwrap_or(defaults.default_user),
            default_password: Self::require_secret(
                "DEFAULT_PASSWORD",
                &environment,
                &defaults.default_password,
            )?,
            email_domain: std::env::var("EMAIL_DOMAIN").unwrap_or(defaults.email_domain),
            idp_email_suffix: std::env::var("IDP_EMAIL_SUFFIX")
                .unwrap_or(defaults.idp_email_suffix),
            db_max_connections: Self::parsed("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            db_max_lifetime: Duration::from_secs(Self::parsed("DB_MAX_LIFETIME_SECS", 300)),
            db_connect_retry: Duration::from_secs(Self::parsed("DB_CONNECT_RETRY_SECS", 5)),
            db_connect_max_attempts: Self::parsed(
                "DB_CONNECT_MAX_ATTEMPTS",
                defaults.db_connect_max_attempts,
            ),
            login_rate_limit: Self::parsed("LOGIN_RATE_LIMIT", defaults.login_rate_limit),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Rewrite the identity-provider suffix to the internal email domain
    pub fn normalize_login(&self, username: &str) -> String {
        if self.idp_email_suffix.is_empty() {
            return username.to_string();
        }
        match username.strip_suffix(self.idp_email_suffix.as_str()) {
            Some(local) => format!("{local}{}", self.email_domain),
            None => username.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("postgres".parse::<Backend>(), Ok(Backend::Postgres));
        assert_eq!(" Memory ".parse::<Backend>(), Ok(Backend::Memory));
        assert!("redis".parse::<Backend>().is_err());
    }

    #[test]
    fn test_normalize_login() {
        let config = Config::default();
        assert_eq!(
            config.normalize_login("j.doe@fictproftaak03.onmicrosoft.com"),
            "j.doe@holiday-parks.eu"
        );
        assert_eq!(
            config.normalize_login("j.doe@holiday-parks.eu"),
            "j.doe@holiday-parks.eu"
        );
    }

    #[test]
    fn test_normalize_login_with_rewrite_disabled() {
        let config = Config {
            idp_email_suffix: String::new(),
            ..Config::default()
        };
        assert_eq!(
            config.normalize_login("a@holiday-parks.eu"),
            "a@holiday-parks.eu"
        );
        assert_eq!(
            config.normalize_login("a@fictproftaak03.onmicrosoft.com"),
            "a@fictproftaak03.onmicrosoft.com"
        );
    }

    #[test]
    fn test_normalize_login_only_rewrites_trailing_suffix() {
        let config = Config::default();
        assert_eq!(
            config.normalize_login("@fictproftaak03.onmicrosoft.com.evil"),
            "@fictproftaak03.onmicrosoft.com.evil"
        );
    }

    #[test]
    fn test_default_is_memory_development() {
        let config = Config::default();
        assert_eq!(config.store_backend, Backend::Memory);
        assert_eq!(config.environment, "development");
        assert_eq!(config.db_max_connections, 25);
    }
}
