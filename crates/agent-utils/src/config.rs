//! Environment configuration helpers
//!
//! Binaries call [`load_dotenv`] once at startup, then read their settings
//! with the typed accessors below.

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(String),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: String, value: String },
}

/// Load a `.env` file from the working directory or its parents, if present
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }
}

/// Required variable; empty values count as unset
pub fn env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(name.to_string()))
}

/// Variable with a fallback
pub fn env_var_or(name: &str, default: &str) -> String {
    env_var(name).unwrap_or_else(|_| default.to_string())
}

/// Optional variable parsed into `T`
pub fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env_var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
