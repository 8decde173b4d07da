use crate::config::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = match state.mcp.tool_count() {
        Ok(tools) => serde_json::json!({ "status": "ok", "tools": tools }),
        Err(e) => serde_json::json!({ "status": "error", "error": e.message }),
    };

    Json(serde_json::json!({
        "status": "ok",
        "service": "mailrelay",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": catalog,
        "sessions": state.sessions.len().await,
    }))
}

/// POST /mcp: one JSON-RPC frame in, one response out
pub async fn mcp_handler(State(state): State<Arc<AppState>>, body: String) -> Response {
    match state.mcp.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
