//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PROXY_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend origin without a trailing slash, e.g. `https://api.example.test`.
    pub backend_url: String,
    pub proxy_timeout: Duration,
    pub proxy_connect_timeout: Duration,
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Required:
    /// - `ACADEMY_BACKEND_URL`: origin `/api/v1/*` is forwarded to
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `ACADEMY_PROXY_TIMEOUT_SECS`: default 30
    /// - `ACADEMY_PROXY_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the backend URL is missing or not
    /// `http(s)`, or `PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("ACADEMY_BACKEND_URL")
            .map_err(|_| ConfigError::Missing("ACADEMY_BACKEND_URL"))?
            .trim()
            .trim_end_matches('/')
            .to_owned();
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid { var: "ACADEMY_BACKEND_URL", value: backend_url });
        }

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            backend_url,
            proxy_timeout: Duration::from_secs(env_parse_u64("ACADEMY_PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS)),
            proxy_connect_timeout: Duration::from_secs(env_parse_u64(
                "ACADEMY_PROXY_CONNECT_TIMEOUT_SECS",
                DEFAULT_PROXY_CONNECT_TIMEOUT_SECS,
            )),
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
