use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerationError, GenerationGateway, TokenStream};
use crate::presentation::config::LlmSettings;

/// Streaming generation against an OpenAI-compatible `/chat/completions` API.
pub struct StreamingLlmClient {
    client: Client,
    provider: String,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, PartialEq)]
enum SseLine {
    Content(String),
    Done,
    Skip,
}

impl StreamingLlmClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        max_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            client: Client::new(),
            provider: "openai".to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    fn build_messages(&self, system_prompt: &str, query: &str, context: &str) -> Vec<ChatMessage> {
        let system_content = if context.trim().is_empty() {
            system_prompt.to_string()
        } else {
            format!("{system_prompt}\n\nContext:\n{context}")
        };

        vec![
            ChatMessage {
                role: "system",
                content: system_content,
            },
            ChatMessage {
                role: "user",
                content: query.to_string(),
            },
        ]
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.provider == "azure" {
            request.header("api-key", &self.api_key)
        } else {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }
}

#[async_trait]
impl GenerationGateway for StreamingLlmClient {
    #[tracing::instrument(skip_all, fields(model = %self.model, provider = %self.provider))]
    async fn generate(
        &self,
        system_prompt: &str,
        query: &str,
        context: &str,
    ) -> Result<TokenStream, GenerationError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(system_prompt, query, context),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: true,
        };

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| GenerationError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        tracing::debug!("Generation stream opened");
        Ok(sse_token_stream(response))
    }
}

/// Lines can straddle network chunks, so bytes are buffered until a newline
/// arrives. Nothing is read from the body until the consumer asks for it.
fn sse_token_stream(response: reqwest::Response) -> TokenStream {
    let mut body = response.bytes_stream();

    Box::pin(async_stream::stream! {
        let mut pending: Vec<u8> = Vec::new();

        while let Some(chunk) = body.next().await {
            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield Err(GenerationError::ApiRequestFailed(e.to_string()));
                    return;
                }
            };
            pending.extend_from_slice(&bytes);

            while let Some(newline) = pending.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = pending.drain(..=newline).collect();
                match parse_sse_line(&String::from_utf8_lossy(&line)) {
                    SseLine::Content(token) => yield Ok(token),
                    SseLine::Done => return,
                    SseLine::Skip => {}
                }
            }
        }

        if let SseLine::Content(token) = parse_sse_line(&String::from_utf8_lossy(&pending)) {
            yield Ok(token);
        }
    })
}

fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.trim_end().strip_prefix("data:") else {
        return SseLine::Skip;
    };
    let data = data.trim_start();

    if data == "[DONE]" {
        return SseLine::Done;
    }

    serde_json::from_str::<ChatCompletionChunk>(data)
        .ok()
        .and_then(|chunk| chunk.choices.into_iter().next())
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(SseLine::Content)
        .unwrap_or(SseLine::Skip)
}

pub fn create_streaming_llm_client(
    settings: &LlmSettings,
) -> Result<StreamingLlmClient, GenerationError> {
    let base_url = match settings.provider.as_str() {
        "openai" => settings
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        "lmstudio" => settings.base_url.clone().ok_or_else(|| {
            GenerationError::Configuration("base_url required for lmstudio provider".to_string())
        })?,
        "azure" => {
            let endpoint = settings.azure_endpoint.as_ref().ok_or_else(|| {
                GenerationError::Configuration(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            format!(
                "{}/openai/deployments/{}",
                endpoint.trim_end_matches('/'),
                settings.chat_model
            )
        }
        other => {
            return Err(GenerationError::Configuration(format!(
                "unknown streaming provider: {}",
                other
            )));
        }
    };

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(settings.request_timeout_seconds))
        .build()
        .map_err(|e| GenerationError::Configuration(e.to_string()))?;

    Ok(StreamingLlmClient {
        client,
        provider: settings.provider.clone(),
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    })
}
