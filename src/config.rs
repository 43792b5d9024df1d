//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use catalog::BackendConfig;
use catalog::config::{DEFAULT_HTTP_TIMEOUT_SECS, default_bucket};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub backend: BackendConfig,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Required:
    /// - `FIREBASE_PROJECT_ID`
    /// - `FIREBASE_API_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `FIREBASE_STORAGE_BUCKET`: default `{project}.appspot.com`
    /// - `FIREBASE_FIRESTORE_URL`, `FIREBASE_STORAGE_URL`, `FIREBASE_AUTH_URL`:
    ///   endpoint overrides (emulators)
    /// - `HTTP_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a
    /// numeric one does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`], reading through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`HostConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let project_id = get("FIREBASE_PROJECT_ID").ok_or(ConfigError::Missing("FIREBASE_PROJECT_ID"))?;
        let api_key = get("FIREBASE_API_KEY").ok_or(ConfigError::Missing("FIREBASE_API_KEY"))?;
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;

        let mut backend = BackendConfig::new(&project_id, &api_key);
        backend.storage_bucket = get("FIREBASE_STORAGE_BUCKET").unwrap_or_else(|| default_bucket(&project_id));
        if let Some(url) = get("FIREBASE_FIRESTORE_URL") {
            backend.firestore_url = url;
        }
        if let Some(url) = get("FIREBASE_STORAGE_URL") {
            backend.storage_url = url;
        }
        if let Some(url) = get("FIREBASE_AUTH_URL") {
            backend.auth_url = url;
        }
        backend.timeout_secs = parse_or("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self { port, backend })
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}
