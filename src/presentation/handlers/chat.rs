use std::convert::Infallible;
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{TenantId, Turn};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatStreamRequest {
    pub tenant_id: TenantId,
    pub message: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Streams one turn as SSE, one `data: {"type", "data"}` frame per event.
///
/// Dropping the response body (client gone) drops the event receiver, which
/// the orchestrator sees as a closed channel.
#[tracing::instrument(skip(state, request), fields(tenant_id = %request.tenant_id))]
pub async fn chat_stream_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatStreamRequest>,
) -> Response {
    tracing::debug!(prompt = %sanitize_prompt(&request.message), "Processing chat stream");

    if request.message.trim().is_empty() {
        tracing::warn!("Chat stream request with empty message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No user message provided".to_string(),
            }),
        )
            .into_response();
    }

    let system_prompt = request
        .system_prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .unwrap_or_else(|| state.settings.turn.default_system_prompt.clone());

    let turn = Turn::new(request.tenant_id, request.message, system_prompt);
    let mut events = state
        .orchestrator
        .spawn(turn, state.settings.turn.channel_capacity);
    let keep_alive_seconds = state.settings.llm.sse_keep_alive_seconds;

    let sse_stream = async_stream::stream! {
        while let Some(event) = events.recv().await {
            if let Some(json) = frame_payload(&event, event.is_terminal()) {
                yield Ok::<_, Infallible>(Event::default().data(json));
            }
        }
    };

    Sse::new(sse_stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(keep_alive_seconds))
                .text("keep-alive"),
        )
        .into_response()
}

/// JSON for one SSE frame. An event that cannot be encoded is skipped, unless
/// it ends the stream: then a generic `error` frame takes its place so the
/// client still sees a terminal event.
fn frame_payload<T: Serialize>(event: &T, terminal: bool) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(json) => Some(json),
        Err(e) if terminal => {
            tracing::error!(error = %e, "Failed to encode terminal event, sending fallback");
            Some(json!({"type": "error", "data": "failed to encode event"}).to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode turn event");
            None
        }
    }
}
