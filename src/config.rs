//! Client configuration.
//!
//! Values come from defaults, then environment variables, then command-line
//! overrides applied through the builder setters.
//!
//! # Example
//!
//! ```ignore
//! use secchat::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?
//!     .with_base_url("https://assistant.internal:8443")?
//!     .with_show_tool_results(true);
//! ```

use std::time::Duration;

use thiserror::Error;

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "SECCHAT_API_URL";
pub const ENV_CONNECT_TIMEOUT: &str = "SECCHAT_CONNECT_TIMEOUT_SECS";
pub const ENV_SHOW_RESULTS: &str = "SECCHAT_SHOW_RESULTS";

/// Errors produced while building a configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidUrl(String),
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Configuration for talking to the assistant backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// How long to wait for the TCP/TLS connection. Streamed bodies have
    /// no overall deadline.
    pub connect_timeout: Duration,
    /// Print tool result previews under each invocation
    pub show_tool_results: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            show_tool_results: false,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_base_url(&url)?;
        }

        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: ENV_CONNECT_TIMEOUT,
                    value: raw.clone(),
                    reason: "expected a positive number of seconds",
                })?;
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(ENV_SHOW_RESULTS) {
            let show = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: ENV_SHOW_RESULTS,
                value: raw.clone(),
                reason: "expected 1/0, true/false, yes/no or on/off",
            })?;
            config = config.with_show_tool_results(show);
        }

        Ok(config)
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(url)?;
        Ok(self)
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set whether tool results are printed.
    pub fn with_show_tool_results(mut self, show: bool) -> Self {
        self.show_tool_results = show;
        self
    }
}

/// Validate a base URL and strip trailing slashes.
pub fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim();
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let base = trimmed.trim_end_matches('/');
    if !has_scheme || base.ends_with(':') {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }
    Ok(base.to_string())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
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
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(!config.show_tool_results);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_all_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://assistant.example.com/"),
            (ENV_CONNECT_TIMEOUT, "3"),
            (ENV_SHOW_RESULTS, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://assistant.example.com");
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert!(config.show_tool_results);
    }

    #[test]
    fn test_from_lookup_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_CONNECT_TIMEOUT, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_CONNECT_TIMEOUT,
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_CONNECT_TIMEOUT, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_from_lookup_invalid_flag() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_SHOW_RESULTS, "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_SHOW_RESULTS,
                ..
            }
        ));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000").unwrap(),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url(" https://host/api// ").unwrap(),
            "https://host/api"
        );
        assert!(normalize_base_url("localhost:8000").is_err());
        assert!(normalize_base_url("ftp://host").is_err());
        assert!(normalize_base_url("http://").is_err());
        assert!(normalize_base_url("").is_err());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_base_url("http://10.0.0.5:9000/")
            .unwrap()
            .with_connect_timeout(Duration::from_millis(250))
            .with_show_tool_results(true);

        assert_eq!(config.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert!(config.show_tool_results);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("nope"), None);
    }
}
