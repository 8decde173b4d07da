use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
};
use futures::Stream;
use mailrelay_mcp::JsonRpcResponse;
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::{ApiError, ApiResult};
use crate::config::AppState;

/// Responses buffered per session before the POST side waits.
const SESSION_BUFFER: usize = 32;

/// Open SSE sessions, keyed by the id handed out in the `endpoint` event.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, mpsc::Sender<JsonRpcResponse>>>>,
}

impl SessionRegistry {
    pub async fn open(&self) -> (Uuid, mpsc::Receiver<JsonRpcResponse>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        self.sessions.write().await.insert(id, tx);
        (id, rx)
    }

    pub async fn sender(&self, id: &Uuid) -> Option<mpsc::Sender<JsonRpcResponse>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn close(&self, id: &Uuid) {
        if self.sessions.write().await.remove(id).is_some() {
            tracing::info!(session_id = %id, "SSE session closed");
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Removes the session once its event stream is dropped.
struct SessionGuard {
    registry: SessionRegistry,
    id: Uuid,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let registry = self.registry.clone();
        let id = self.id;
        tokio::spawn(async move { registry.close(&id).await });
    }
}

/// GET /sse: open a session and stream its responses
pub async fn sse_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, mut rx) = state.sessions.open().await;
    tracing::info!(session_id = %id, "SSE session opened");

    let guard = SessionGuard {
        registry: state.sessions.clone(),
        id,
    };

    let stream = async_stream::stream! {
        let _guard = guard;

        yield Ok(Event::default()
            .event("endpoint")
            .data(format!("/messages?sessionId={}", id)));

        while let Some(response) = rx.recv().await {
            match Event::default().event("message").json_data(&response) {
                Ok(event) => yield Ok(event),
                Err(e) => tracing::error!(session_id = %id, error = %e, "Failed to encode SSE event"),
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
}

/// POST /messages?sessionId=: handle one frame, reply on the session stream
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> ApiResult<Response> {
    let tx = state
        .sessions
        .sender(&query.session_id)
        .await
        .ok_or_else(|| ApiError::not_found(format!("Unknown session: {}", query.session_id)))?;

    if let Some(response) = state.mcp.handle_message(&body).await {
        if tx.send(response).await.is_err() {
            state.sessions.close(&query.session_id).await;
            return Err(ApiError::not_found(format!(
                "Session closed: {}",
                query.session_id
            )));
        }
    }

    Ok(StatusCode::ACCEPTED.into_response())
}
