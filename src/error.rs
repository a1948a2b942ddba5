//! Error types for the MailRoster client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors raised by the HTTP transport when talking to the MailRoster API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    ///
    /// Finder operations convert this into `Ok(None)` at the boundary;
    /// it only surfaces from non-finder calls.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the request (HTTP 4xx other than 404).
    /// Carries the `message` field from the response body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API returned a non-4xx error status code
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Network timeout
    #[error("request timeout")]
    Timeout,

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while working with resource objects.
///
/// Local validation failures are raised before any network call is
/// attempted; transport failures are wrapped via [`ApiError`].
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying transport failure
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A data-field key not present in the account's field catalogue
    #[error("unknown data field: {0}")]
    UnknownDataField(String),

    /// An opt-in type value the service does not recognize
    #[error("unknown opt-in type: {0}")]
    UnknownOptInType(String),

    /// A required contact attribute was not supplied
    #[error("missing attribute: {0}")]
    MissingAttribute(&'static str),

    /// The fault report was requested before the import reached a terminal status
    #[error("import has not finished")]
    ImportNotFinished,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Convenience type alias for Results with Error
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
