//! Server configuration parsed from environment variables.
//!
//! The only settings are the listen port and the Firebase web-app
//! credentials that the SSR shell hands to the browser.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use client::net::firebase::FirebaseConfig;

pub const DEFAULT_PORT: u16 = 3000;

/// Errors produced while reading configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub port: u16,
    pub firebase: FirebaseConfig,
}

impl PortalConfig {
    /// Build config from the process environment.
    ///
    /// Required:
    /// - `FIREBASE_API_KEY`
    /// - `FIREBASE_AUTH_DOMAIN`
    /// - `FIREBASE_PROJECT_ID`
    ///
    /// Optional:
    /// - `FIREBASE_APP_ID`
    /// - `PORT`: default 3000
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or `PORT` is not a
    /// valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`PortalConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let required = |key: &'static str| value(key).ok_or(ConfigError::Missing(key));

        let port = match value("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let firebase = FirebaseConfig {
            api_key: required("FIREBASE_API_KEY")?,
            auth_domain: required("FIREBASE_AUTH_DOMAIN")?,
            project_id: required("FIREBASE_PROJECT_ID")?,
            app_id: value("FIREBASE_APP_ID"),
        };

        Ok(Self { port, firebase })
    }
}
