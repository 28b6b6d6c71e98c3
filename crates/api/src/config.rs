//! Process configuration, read once at startup.
//!
//! | variable                  | required | default        |
//! |---------------------------|----------|----------------|
//! | `USER_SERVICE_URL`        | yes      |                |
//! | `JWT_SECRET`              | yes      |                |
//! | `JWT_TTL_SECS`            | no       | `86400`        |
//! | `USER_SERVICE_TIMEOUT_MS` | no       | `5000`         |
//! | `BIND_ADDR`               | no       | `0.0.0.0:8080` |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use passgate_auth::MAX_TTL_SECS;
use passgate_infra::DirectoryConfig;

pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
pub const DEFAULT_DIRECTORY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// Immutable process-wide settings, passed explicitly into constructors.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub directory: DirectoryConfig,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("directory", &self.directory)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = get("USER_SERVICE_URL").ok_or(ConfigError::Missing("USER_SERVICE_URL"))?;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "USER_SERVICE_URL",
                "must start with http:// or https://",
            ));
        }

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl = match get("JWT_TTL_SECS") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|s| (1..=MAX_TTL_SECS).contains(s))
                .and_then(chrono::Duration::try_seconds)
                .ok_or_else(|| {
                    ConfigError::invalid(
                        "JWT_TTL_SECS",
                        format!("must be an integer between 1 and {MAX_TTL_SECS}"),
                    )
                })?,
            None => chrono::Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        };

        let timeout_ms = match get("USER_SERVICE_TIMEOUT_MS") {
            Some(v) => v.parse::<u64>().ok().filter(|ms| *ms > 0).ok_or_else(|| {
                ConfigError::invalid("USER_SERVICE_TIMEOUT_MS", "must be a positive integer")
            })?,
            None => DEFAULT_DIRECTORY_TIMEOUT_MS,
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", e.to_string()))?;

        Ok(Self {
            bind_addr,
            directory: DirectoryConfig {
                base_url,
                timeout: Duration::from_millis(timeout_ms),
            },
            jwt_secret,
            token_ttl,
        })
    }
}
