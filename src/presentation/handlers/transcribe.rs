use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::state::AppState;

use super::chat::ErrorResponse;

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[tracing::instrument(skip(state, audio), fields(bytes = audio.len()))]
pub async fn transcribe_handler(State(state): State<AppState>, audio: Bytes) -> Response {
    match state.transcription_engine.transcribe(&audio).await {
        Ok(text) if !text.is_empty() => {
            (StatusCode::OK, Json(TranscriptionResponse { text })).into_response()
        }
        Ok(_) => {
            tracing::warn!("Transcription returned no text");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Transcription failed (empty result)".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
