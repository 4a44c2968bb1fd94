use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process configuration, assembled once at startup from the environment
/// and handed to the router explicitly (no global singleton).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full MongoDB connection string.
    pub uri: String,
    /// Database holding the content and toy collections.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// HMAC secret for signing and verifying bearer tokens.
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Page size applied when the client omits `limit`.
    pub default_page_size: i64,
    /// Hard upper bound on `limit`; requests above it are clamped.
    pub max_page_size: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set to a non-empty signing secret")]
    MissingSecret,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_MONGODB_DB: &str = "playmart";
const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source. Used by
    /// `from_env` in production and by tests without touching the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("SECRET_KEY").unwrap_or_default();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let default_page_size = parse_or(
            "API_DEFAULT_PAGE_SIZE",
            lookup("API_DEFAULT_PAGE_SIZE"),
            DEFAULT_PAGE_SIZE,
        )?;
        let max_page_size =
            parse_or("API_MAX_PAGE_SIZE", lookup("API_MAX_PAGE_SIZE"), MAX_PAGE_SIZE)?;

        Ok(Self {
            port,
            database: DatabaseConfig {
                uri: lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
                name: lookup("MONGODB_DB").unwrap_or_else(|| DEFAULT_MONGODB_DB.to_string()),
            },
            security: SecurityConfig { jwt_secret },
            api: ApiConfig {
                default_page_size,
                max_page_size,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}
