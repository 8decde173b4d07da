//! Error types for the SendGrid SDK.

use serde::{Deserialize, Serialize};

/// Result type for SDK operations.
pub type SendGridResult<T> = Result<T, SendGridError>;

/// Error types that can occur when calling the SendGrid API.
#[derive(Debug, thiserror::Error)]
pub enum SendGridError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SendGrid answered with a non-success status.
    ///
    /// `errors` holds every entry of the response's `errors` array, in order.
    #[error("API error (status {status}): {}", join_messages(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorItem>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A caller-supplied value cannot be sent, such as an id that is not a
    /// single path segment.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SendGridError {
    /// Check if repeating the request may succeed without side effects.
    ///
    /// Only a 429 guarantees SendGrid did not act on the request, so server
    /// errors and timeouts are retryable for idempotent requests only.
    pub fn is_retryable(&self, idempotent: bool) -> bool {
        match self {
            Self::Api { status: 429, .. } => true,
            Self::Api { status, .. } => idempotent && *status >= 500,
            Self::Timeout => idempotent,
            _ => false,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let errors = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) if !response.errors.is_empty() => response.errors,
            _ => {
                let message = body.trim();
                let message = if message.is_empty() {
                    format!("request failed with status {}", status)
                } else {
                    message.to_string()
                };
                vec![ApiErrorItem {
                    message,
                    field: None,
                    help: None,
                }]
            }
        };

        Self::Api { status, errors }
    }

    /// The structured error entries, when SendGrid returned any.
    pub fn api_errors(&self) -> Option<&[ApiErrorItem]> {
        match self {
            Self::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

fn join_messages(errors: &[ApiErrorItem]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error body returned by the SendGrid API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

/// A single entry of a SendGrid `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorItem {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<serde_json::Value>,
}
