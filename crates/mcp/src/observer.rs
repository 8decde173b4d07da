// Request lifecycle hooks used for logging

use crate::error::ToolError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Which protocol operation a request is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind<'a> {
    ListTools,
    CallTool { name: &'a str },
}

impl RequestKind<'_> {
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            RequestKind::ListTools => None,
            RequestKind::CallTool { name } => Some(name),
        }
    }
}

/// Observes requests handled by [`crate::McpServer`].
///
/// Observers only see requests; nothing they do changes a response.
pub trait RequestObserver: Send + Sync {
    fn request_received(&self, _request: RequestKind<'_>) {}

    fn request_succeeded(&self, _request: RequestKind<'_>) {}

    fn request_failed(&self, _request: RequestKind<'_>, _error: &ToolError) {}
}

/// Emits one `tracing` event per lifecycle point.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn request_received(&self, request: RequestKind<'_>) {
        match request.tool_name() {
            Some(tool) => tracing::info!(tool, "Tool call received"),
            None => tracing::info!("List tools request received"),
        }
    }

    fn request_succeeded(&self, request: RequestKind<'_>) {
        match request.tool_name() {
            Some(tool) => tracing::info!(tool, "Tool call succeeded"),
            None => tracing::debug!("List tools request succeeded"),
        }
    }

    fn request_failed(&self, request: RequestKind<'_>, error: &ToolError) {
        tracing::warn!(
            tool = request.tool_name().unwrap_or("tools/list"),
            category = %error.category,
            message = %error.message,
            "Request failed"
        );
    }
}

/// Run an observer hook, swallowing any panic it raises.
pub(crate) fn notify(f: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(f)).is_err() {
        tracing::error!("Request observer panicked");
    }
}
