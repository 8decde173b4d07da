//! MCP tool layer for the SendGrid email API.
//!
//! Requests flow through [`normalize`], [`dispatch`] and, on failure,
//! [`translate`] before leaving [`McpServer`]. Transports live in the
//! server crate.

pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod observer;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod translate;

pub use dispatch::Dispatcher;
pub use error::{ErrorCategory, ServiceErrorDetail, ToolError, ToolFault};
pub use normalize::{normalize, RawArguments};
pub use observer::{RequestKind, RequestObserver, TracingObserver};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
pub use tools::{build_catalog, sendgrid_tools, Tool, ToolCatalog};
pub use translate::{translate, FALLBACK_MESSAGE};
