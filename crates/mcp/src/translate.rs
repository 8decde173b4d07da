// Maps every ToolFault onto exactly one ToolError

use crate::error::{ErrorCategory, ToolError, ToolFault};

/// Message used when a fault carries nothing worth showing.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Separator between joined service error messages.
pub const SERVICE_ERROR_SEPARATOR: &str = ", ";

/// Classify a fault. Total: every input yields one well-formed error.
pub fn translate(fault: ToolFault) -> ToolError {
    match fault {
        ToolFault::Service { errors } if !errors.is_empty() => {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(SERVICE_ERROR_SEPARATOR);
            ToolError::new(ErrorCategory::InternalError, message)
        }
        ToolFault::Service { .. } | ToolFault::Unknown => {
            ToolError::new(ErrorCategory::InternalError, FALLBACK_MESSAGE)
        }
        ToolFault::Generic(message) | ToolFault::Catalog(message) => {
            ToolError::new(ErrorCategory::InternalError, non_empty(message))
        }
        ToolFault::InvalidArguments(message) => {
            ToolError::new(ErrorCategory::InvalidRequest, non_empty(message))
        }
        ToolFault::UnknownTool(name) => {
            ToolError::new(ErrorCategory::MethodNotFound, format!("Unknown tool: {}", name))
        }
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}
