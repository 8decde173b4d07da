// Failure shapes raised while serving tools, and the error contract callers see

use mailrelay_sdk::SendGridError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::protocol::JsonRpcError;

/// Raw failure raised by catalog construction, argument normalization,
/// dispatch or a tool handler. Turned into a [`ToolError`] exactly once by
/// [`crate::translate::translate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolFault {
    /// The email service answered and rejected the request.
    #[error("service rejected the request ({} errors)", .errors.len())]
    Service { errors: Vec<ServiceErrorDetail> },

    /// Any other error that carries a message.
    #[error("{0}")]
    Generic(String),

    /// A failure with no recognizable shape (a panicking handler).
    #[error("unrecognized fault")]
    Unknown,

    /// Call arguments could not be decoded or do not fit the tool's schema.
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool catalog could not be built.
    #[error("{0}")]
    Catalog(String),
}

impl ToolFault {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }
}

/// One entry of the email service's error list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceErrorDetail {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ServiceErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

impl From<SendGridError> for ToolFault {
    fn from(err: SendGridError) -> Self {
        match err {
            SendGridError::Api { errors, .. } if !errors.is_empty() => Self::Service {
                errors: errors
                    .into_iter()
                    .map(|e| ServiceErrorDetail {
                        message: e.message,
                        field: e.field,
                    })
                    .collect(),
            },
            SendGridError::InvalidArgument(message) => Self::InvalidArguments(message),
            other => Self::Generic(other.to_string()),
        }
    }
}

/// Protocol-level error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    InvalidRequest,
    MethodNotFound,
    InternalError,
}

impl ErrorCategory {
    /// JSON-RPC error code for this category.
    pub fn code(self) -> i32 {
        match self {
            Self::InvalidRequest => JsonRpcError::INVALID_REQUEST,
            Self::MethodNotFound => JsonRpcError::METHOD_NOT_FOUND,
            Self::InternalError => JsonRpcError::INTERNAL_ERROR,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidRequest => "InvalidRequest",
            Self::MethodNotFound => "MethodNotFound",
            Self::InternalError => "InternalError",
        };
        f.write_str(name)
    }
}

/// The only error shape that leaves the tool layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category}: {message}")]
pub struct ToolError {
    pub category: ErrorCategory,
    pub message: String,
}

impl ToolError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl From<ToolError> for JsonRpcError {
    fn from(err: ToolError) -> Self {
        Self {
            code: err.category.code(),
            message: err.message,
            data: None,
        }
    }
}
