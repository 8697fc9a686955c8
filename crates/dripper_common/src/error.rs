// --- File: crates/dripper_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all DripperScheduler crates.
///
/// Feature crates keep their own error enums and convert into this one at
/// the HTTP boundary.
#[derive(Error, Debug)]
pub enum DripperError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The request is valid but not allowed in the current state
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The feature is switched off in the runtime configuration
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DripperError {
    fn status_code(&self) -> u16 {
        match self {
            DripperError::HttpError(_) => 502,
            DripperError::ParseError(_) => 400,
            DripperError::ConfigError(_) => 500,
            DripperError::ValidationError(_) => 422,
            DripperError::ExternalServiceError { .. } => 502,
            DripperError::ConflictError(_) => 409,
            DripperError::NotFoundError(_) => 404,
            DripperError::ServiceUnavailable(_) => 503,
            DripperError::TimeoutError(_) => 504,
            DripperError::InternalError(_) => 500,
        }
    }
}

impl From<reqwest::Error> for DripperError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DripperError::TimeoutError(err.to_string())
        } else {
            DripperError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DripperError {
    fn from(err: serde_json::Error) -> Self {
        DripperError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for DripperError {
    fn from(err: std::io::Error) -> Self {
        DripperError::InternalError(err.to_string())
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> DripperError {
    DripperError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> DripperError {
    DripperError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> DripperError {
    DripperError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> DripperError {
    DripperError::ConflictError(message.to_string())
}

pub fn service_unavailable<T: fmt::Display>(message: T) -> DripperError {
    DripperError::ServiceUnavailable(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> DripperError {
    DripperError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
