//! Configuration management for the MailRoster client.
//!
//! This module handles loading and validating configuration from environment variables.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the MailRoster client.
#[derive(Debug, Clone)]
pub struct Config {
    /// MailRoster API base URL
    pub api_base_url: String,

    /// API key for authentication
    pub api_key: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `MAILROSTER_API_BASE_URL`: Base URL for the MailRoster API
    /// - `MAILROSTER_API_KEY`: API key for authentication
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("MAILROSTER_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("MAILROSTER_API_BASE_URL".to_string()))?;

        let api_key = env::var("MAILROSTER_API_KEY")
            .map_err(|_| ConfigError::MissingVar("MAILROSTER_API_KEY".to_string()))?;

        // Validate API URL format
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "MAILROSTER_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        // Validate API key is not empty
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MAILROSTER_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            api_key,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            api_key: String::new(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}
