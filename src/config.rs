//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_TTL_SECS;

/// Default upstream base URL (RapidAPI VACCOVID tracker)
pub const DEFAULT_UPSTREAM_BASE_URL: &str =
    "https://vaccovid-coronavirus-vaccine-and-treatment-tracker.p.rapidapi.com/api";

/// Default value of the `x-rapidapi-host` header
pub const DEFAULT_UPSTREAM_HOST: &str =
    "vaccovid-coronavirus-vaccine-and-treatment-tracker.p.rapidapi.com";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time to live of cached upstream responses, in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream statistics API
    pub upstream_base_url: String,
    /// Value of the `x-rapidapi-host` header
    pub upstream_host: String,
    /// Value of the `x-rapidapi-key` header, if any
    pub upstream_api_key: Option<String>,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `UPSTREAM_BASE_URL` - Upstream API base URL
    /// - `UPSTREAM_HOST` - `x-rapidapi-host` header value
    /// - `UPSTREAM_API_KEY` - `x-rapidapi-key` header value (unset: no header)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            upstream_host: env::var("UPSTREAM_HOST").unwrap_or(defaults.upstream_host),
            upstream_api_key: env::var("UPSTREAM_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_TTL_SECS,
            server_port: 8080,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_host: DEFAULT_UPSTREAM_HOST.to_string(),
            upstream_api_key: None,
            upstream_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 100);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert_eq!(config.upstream_host, DEFAULT_UPSTREAM_HOST);
        assert!(config.upstream_api_key.is_none());
        assert_eq!(config.upstream_timeout, 10);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL");
        env::remove_var("SERVER_PORT");
        env::remove_var("UPSTREAM_BASE_URL");
        env::remove_var("UPSTREAM_HOST");
        env::remove_var("UPSTREAM_API_KEY");
        env::remove_var("UPSTREAM_TIMEOUT");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 100);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.upstream_base_url, DEFAULT_UPSTREAM_BASE_URL);
        assert!(config.upstream_api_key.is_none());
        assert_eq!(config.upstream_timeout, 10);
    }
}
