// --- File: crates/dripper_chat/src/error.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use dripper_common::{
    config_error, external_service_error, service_unavailable, DripperError, HttpStatusCode,
};
use thiserror::Error;

use crate::logic::ChatErrorResponse;

/// Message returned to clients for every failure other than a missing key.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to process request";

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("{0} API key is not configured")]
    NotConfigured(&'static str),

    #[error("Invalid chat request: {0}")]
    InvalidRequest(String),

    #[error("Request to chat provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{provider} API returned {status}: {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Unexpected {provider} response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    #[error("{0} response contained no text")]
    EmptyResponse(&'static str),

    #[error("Chat is disabled")]
    Disabled,
}

impl ChatError {
    /// The text clients see. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ChatError::NotConfigured(_) | ChatError::Disabled => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<ChatError> for DripperError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotConfigured(_) => config_error(err),
            ChatError::InvalidRequest(msg) => DripperError::ParseError(msg),
            ChatError::Request(e) => DripperError::from(e),
            ChatError::Api { provider, .. }
            | ChatError::InvalidResponse { provider, .. }
            | ChatError::EmptyResponse(provider) => external_service_error(provider, &err),
            ChatError::Disabled => service_unavailable(err),
        }
    }
}

impl HttpStatusCode for ChatError {
    fn status_code(&self) -> u16 {
        match self {
            ChatError::Disabled => 503,
            _ => 500,
        }
    }
}

// The chat routes answer with a flat `{"error": "..."}` body.
impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ChatErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
