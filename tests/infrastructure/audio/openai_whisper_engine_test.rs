use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;

use voxrag::application::ports::{TranscriptionEngine, TranscriptionError};
use voxrag::infrastructure::audio::{DEFAULT_MIN_AUDIO_BYTES, OpenAiWhisperEngine};

use crate::helpers::start_mock_server;

fn engine_for(base_url: String) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None)
}

#[tokio::test]
async fn given_audio_when_transcribing_then_returns_trimmed_text() {
    let app = Router::new().route(
        "/audio/transcriptions",
        post(|| async { "  What is Rust?\n" }),
    );
    let (base_url, _shutdown) = start_mock_server(app).await;
    let audio = vec![0u8; DEFAULT_MIN_AUDIO_BYTES];

    let text = engine_for(base_url).transcribe(&audio).await.unwrap();

    assert_eq!(text, "What is Rust?");
}

#[tokio::test]
async fn given_clip_below_minimum_when_transcribing_then_empty_without_request() {
    let engine = engine_for("http://127.0.0.1:1".to_string());

    let text = engine.transcribe(&[1, 2, 3]).await.unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn given_lowered_minimum_when_transcribing_short_clip_then_request_is_sent() {
    let app = Router::new().route("/audio/transcriptions", post(|| async { "hi" }));
    let (base_url, _shutdown) = start_mock_server(app).await;

    let text = engine_for(base_url)
        .with_min_audio_bytes(1)
        .transcribe(&[1, 2, 3])
        .await
        .unwrap();

    assert_eq!(text, "hi");
}

#[tokio::test]
async fn given_server_error_when_transcribing_then_api_request_failed() {
    let app = Router::new().route(
        "/audio/transcriptions",
        post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
    );
    let (base_url, _shutdown) = start_mock_server(app).await;
    let audio = vec![0u8; DEFAULT_MIN_AUDIO_BYTES];

    let result = engine_for(base_url).transcribe(&audio).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
}
