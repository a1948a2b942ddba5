//! HTTP transport for the MailRoster contact-management API.
//!
//! This module provides a synchronous HTTP client built on `ureq`. The client
//! handles authentication, error mapping, and the JSON/CSV request variants the
//! resource objects delegate to. Resource semantics live in [`crate::models`];
//! this layer only moves bytes and translates failures.

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Synchronous HTTP client for the MailRoster API.
///
/// Cloning is cheap; the underlying `ureq::Agent` is shared behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL for the API
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl ApiClient {
    /// Create a new ApiClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
            agent: Arc::new(agent),
        }
    }

    /// Create an ApiClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request and parse the JSON response.
    pub fn get(&self, path: &str) -> ApiResult<Value> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .set("X-Api-Key", &self.api_key)
            .set("Accept", "application/json")
            .call()
            .map_err(map_error)?;

        read_json(response)
    }

    /// Execute a POST request with a JSON body and parse the JSON response.
    pub fn post_json(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .agent
            .post(&url)
            .set("X-Api-Key", &self.api_key)
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(map_error)?;

        read_json(response)
    }

    /// Execute a PUT request with a JSON body and parse the JSON response.
    pub fn put_json(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let url = self.build_url(path);
        tracing::debug!("PUT {}", url);

        let response = self
            .agent
            .put(&url)
            .set("X-Api-Key", &self.api_key)
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(map_error)?;

        read_json(response)
    }

    /// Execute a DELETE request, discarding any response body.
    pub fn delete(&self, path: &str) -> ApiResult<()> {
        let url = self.build_url(path);
        tracing::debug!("DELETE {}", url);

        self.agent
            .delete(&url)
            .set("X-Api-Key", &self.api_key)
            .call()
            .map_err(map_error)?;

        Ok(())
    }

    /// Execute a POST request with a CSV body and parse the JSON response.
    pub fn post_csv(&self, path: &str, csv: &str) -> ApiResult<Value> {
        let url = self.build_url(path);
        tracing::debug!("POST {} ({} bytes of CSV)", url, csv.len());

        let response = self
            .agent
            .post(&url)
            .set("X-Api-Key", &self.api_key)
            .set("Content-Type", "text/csv")
            .set("Accept", "application/json")
            .send_string(csv)
            .map_err(map_error)?;

        read_json(response)
    }

    /// Execute a GET request for a CSV document, returned as raw text.
    pub fn get_csv(&self, path: &str) -> ApiResult<String> {
        let url = self.build_url(path);
        tracing::debug!("GET {} (CSV)", url);

        let response = self
            .agent
            .get(&url)
            .set("X-Api-Key", &self.api_key)
            .set("Accept", "text/csv")
            .call()
            .map_err(map_error)?;

        response.into_string().map_err(|e| ApiError::Http(e.to_string()))
    }
}

/// Read a response body and parse it as JSON.
fn read_json(response: ureq::Response) -> ApiResult<Value> {
    let body = response
        .into_string()
        .map_err(|e| ApiError::Http(e.to_string()))?;

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(ApiError::Json)
}

/// Map a ureq error to an ApiError.
///
/// 404 means the resource is absent; any other 4xx carries a server message
/// (the body's JSON `message` field when present, otherwise the raw body).
fn map_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let body = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                404 => ApiError::NotFound,
                400..=499 => ApiError::InvalidRequest(error_message(&body)),
                _ => ApiError::Api {
                    status: code,
                    message: body,
                },
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                ApiError::Http("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                ApiError::Timeout
            } else {
                ApiError::Http(transport.to_string())
            }
        }
    }
}

/// Extract the `message` field from an error response body, falling back to
/// the body itself when it is not JSON.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
