//! Startup configuration from the environment.

use std::net::SocketAddr;

use thiserror::Error;

pub const API_URL_VAR: &str = "DETAILING_API_URL";
pub const BIND_ADDR_VAR: &str = "DETAILING_BIND_ADDR";
pub const ENV_VAR: &str = "DETAILING_ENV";

const DEFAULT_API_URL: &str = "http://localhost:4000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Backend base URL, without trailing slash requirements.
    pub api_url: String,
    pub bind_addr: SocketAddr,
    pub environment: Environment,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DETAILING_BIND_ADDR: invalid socket address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("DETAILING_ENV: expected 'development' or 'production', got '{0}'")]
    InvalidEnvironment(String),
}

impl WebConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get(API_URL_VAR).unwrap_or_else(|| {
            tracing::warn!("{API_URL_VAR} not set; using {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });

        let bind_raw = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw.clone(),
                source,
            })?;

        let environment = match get(ENV_VAR) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        Ok(Self {
            api_url,
            bind_addr,
            environment,
        })
    }

    /// Config for a given backend, bound to an ephemeral local port.
    pub fn for_backend(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            environment: Environment::Development,
        }
    }

    /// Cookies carry `Secure` only in production.
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = WebConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:4000");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.secure_cookies());
    }

    #[test]
    fn production_enables_secure_cookies() {
        let config = WebConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://api.example.com"),
            (ENV_VAR, "Production"),
            (BIND_ADDR_VAR, "127.0.0.1:8081"),
        ]))
        .unwrap();
        assert!(config.secure_cookies());
        assert_eq!(config.bind_addr.port(), 8081);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            WebConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "nope")])),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            WebConfig::from_lookup(lookup(&[(ENV_VAR, "staging")])),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }
}
