// MCP server: routes protocol requests to the catalog and dispatcher

use crate::dispatch::Dispatcher;
use crate::error::{ToolError, ToolFault};
use crate::normalize::normalize;
use crate::observer::{notify, RequestKind, RequestObserver, TracingObserver};
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolCatalog;
use crate::translate::translate;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Stateless request handler shared by every transport session.
pub struct McpServer {
    dispatcher: Result<Dispatcher, ToolFault>,
    observer: Arc<dyn RequestObserver>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self::from_catalog(Ok(catalog))
    }

    /// Keep serving even if the catalog failed to build; every tool request
    /// then reports the build failure.
    pub fn from_catalog(catalog: Result<ToolCatalog, ToolFault>) -> Self {
        Self {
            dispatcher: catalog.map(|c| Dispatcher::new(Arc::new(c))),
            observer: Arc::new(TracingObserver),
            info: ServerInfo::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn dispatcher(&self) -> Result<&Dispatcher, ToolFault> {
        self.dispatcher.as_ref().map_err(ToolFault::clone)
    }

    /// Number of catalog tools, without going through the request observer.
    pub fn tool_count(&self) -> Result<usize, ToolError> {
        self.dispatcher()
            .map(|d| d.catalog().len())
            .map_err(translate)
    }

    /// Handle `tools/list`.
    pub fn list_tools(&self) -> Result<ListToolsResult, ToolError> {
        let request = RequestKind::ListTools;
        notify(|| self.observer.request_received(request));

        let outcome = self
            .dispatcher()
            .map(|d| ListToolsResult {
                tools: d.catalog().list_tools(),
            })
            .map_err(translate);

        self.report(request, &outcome);
        outcome
    }

    /// Handle `tools/call`: normalize, dispatch, translate on failure.
    pub async fn call_tool(&self, params: CallToolParams) -> Result<CallToolResult, ToolError> {
        let request = RequestKind::CallTool { name: &params.name };
        notify(|| self.observer.request_received(request));

        let outcome = async {
            let dispatcher = self.dispatcher()?;
            let arguments = normalize(params.arguments.clone())?;
            dispatcher.call_tool(&params.name, arguments).await
        }
        .await
        .map_err(translate);

        self.report(request, &outcome);
        outcome
    }

    /// Handle `tools/call` params that are still undecoded JSON.
    ///
    /// Params that do not match the call shape fail like any other invalid
    /// arguments, under the tool name when one can be read.
    async fn call_tool_json(&self, params: Value) -> Result<CallToolResult, ToolError> {
        match CallToolParams::deserialize(&params) {
            Ok(params) => self.call_tool(params).await,
            Err(e) => {
                let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
                let request = RequestKind::CallTool { name };
                notify(|| self.observer.request_received(request));

                let outcome = Err(translate(ToolFault::invalid_arguments(format!(
                    "Invalid tools/call params: {}",
                    e
                ))));

                self.report(request, &outcome);
                outcome
            }
        }
    }

    fn report<T>(&self, request: RequestKind<'_>, outcome: &Result<T, ToolError>) {
        match outcome {
            Ok(_) => notify(|| self.observer.request_succeeded(request)),
            Err(e) => notify(|| self.observer.request_failed(request, e)),
        }
    }

    /// Handle one decoded JSON-RPC message. Notifications yield `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(serde_json::Value::Null),
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }
        let id = request.id.unwrap_or(serde_json::Value::Null);

        let response = match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = request
                    .params
                    .and_then(|p| serde_json::from_value(p).ok())
                    .unwrap_or_default();
                if let Some(client) = &params.client_info {
                    tracing::info!(client = %client.name, version = %client.version, "Client initialized");
                }
                JsonRpcResponse::success(id, self.initialize_result(params))
            }
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => match self.list_tools() {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, e.into()),
            },
            "tools/call" => {
                match self.call_tool_json(request.params.unwrap_or_default()).await {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(e) => JsonRpcResponse::error(id, e.into()),
                }
            }
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    /// Handle one raw JSON-RPC frame.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(message) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                serde_json::Value::Null,
                JsonRpcError::parse_error(format!("Parse error: {}", e)),
            )),
        }
    }

    fn initialize_result(&self, params: InitializeParams) -> InitializeResult {
        InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        }
    }
}
