use std::path::PathBuf;
use std::str::FromStr;

use glavtrub_core::seo::SiteInfo;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Public site name and base URL used for canonical links and JSON-LD.
    pub site: SiteInfo,
    /// Root directory served at `/static`.
    pub static_dir: PathBuf,
    /// Where uploads are written; must live under `static_dir`.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// HMAC key for lead-form captcha tokens.
    pub captcha_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `DATABASE_URL`           | required                   |
    /// | `JWT_SECRET`             | required                   |
    /// | `JWT_ACCESS_EXPIRY_MINS` | `720`                      |
    /// | `SITE_NAME`              | `ГлавТрубТорг`             |
    /// | `SITE_URL`               | `https://glavtrubtorg.ru`  |
    /// | `STATIC_DIR`             | `static`                   |
    /// | `UPLOAD_DIR`             | `static/uploads`           |
    /// | `MAX_UPLOAD_BYTES`       | `16777216`                 |
    /// | `CAPTCHA_SECRET`         | `JWT_SECRET`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt = JwtConfig::from_env()?;
        let captcha_secret = std::env::var("CAPTCHA_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| jwt.secret.clone());

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000)?,
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30)?,
            database_url: required("DATABASE_URL")?,
            jwt,
            site: SiteInfo::new(
                env_or("SITE_NAME", "ГлавТрубТорг"),
                env_or("SITE_URL", "https://glavtrubtorg.ru"),
            ),
            static_dir: env_or("STATIC_DIR", "static").into(),
            upload_dir: env_or("UPLOAD_DIR", "static/uploads").into(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 16 * 1024 * 1024)?,
            captcha_secret,
        })
    }
}

pub(crate) fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub(crate) fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

pub(crate) fn parse_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_uses_default_when_unset() {
        std::env::remove_var("GLAVTRUB_TEST_UNSET_PORT");
        assert_eq!(parse_env("GLAVTRUB_TEST_UNSET_PORT", 3000u16).unwrap(), 3000);
    }

    #[test]
    fn parse_env_rejects_garbage() {
        std::env::set_var("GLAVTRUB_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("GLAVTRUB_TEST_BAD_PORT", 3000).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GLAVTRUB_TEST_BAD_PORT has an invalid value: eighty"
        );
    }

    #[test]
    fn required_rejects_empty() {
        std::env::set_var("GLAVTRUB_TEST_EMPTY", "");
        assert!(matches!(
            required("GLAVTRUB_TEST_EMPTY"),
            Err(ConfigError::Missing("GLAVTRUB_TEST_EMPTY"))
        ));
    }
}
