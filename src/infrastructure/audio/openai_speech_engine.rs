use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SpeechGateway, SynthesisError};

/// Sentence-level synthesis against an OpenAI-compatible `/audio/speech` API.
pub struct OpenAiSpeechEngine {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
    response_format: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

impl OpenAiSpeechEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: String,
        voice: String,
        response_format: String,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model,
            voice,
            response_format,
        }
    }
}

#[async_trait]
impl SpeechGateway for OpenAiSpeechEngine {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError> {
        if text.trim().is_empty() {
            return Ok(Bytes::new());
        }

        let url = format!("{}/audio/speech", self.base_url);
        let request_body = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            response_format: &self.response_format,
        };

        tracing::debug!(model = %self.model, chars = text.len(), "Requesting speech synthesis");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SynthesisError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(format!("body: {}", e)))?;

        tracing::debug!(bytes = audio.len(), "Speech synthesis completed");
        Ok(audio)
    }
}
