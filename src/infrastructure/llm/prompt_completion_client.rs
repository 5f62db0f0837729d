use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    GenerationError, GenerationGateway, TokenStream, classify_fragment,
};

static REASONING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

pub const EMPTY_ANSWER_FALLBACK: &str = "Sorry, I could not produce a valid answer.";

/// Generation against a single-shot `{"prompt"} -> {"response"}` endpoint.
///
/// The backend answers all at once; the answer is cleaned and replayed word by
/// word so downstream narration can start on the first sentence.
pub struct PromptCompletionClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct PromptResponse {
    #[serde(default)]
    response: String,
}

impl PromptCompletionClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Configuration(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

pub fn build_prompt(system_prompt: &str, query: &str, context: &str) -> String {
    format!(
        "[INSTRUCTION]: {system_prompt}\n\n[CONTEXT]:\n{context}\n\n[USER QUESTION]:\n{query}\n"
    )
}

/// Drops `<think>...</think>` reasoning blocks and surrounding whitespace.
pub fn strip_reasoning(text: &str) -> String {
    REASONING_BLOCK.replace_all(text, "").trim().to_string()
}

fn replay_words(answer: &str) -> Vec<Result<String, GenerationError>> {
    answer.split(' ').map(|word| Ok(format!("{word} "))).collect()
}

#[async_trait]
impl GenerationGateway for PromptCompletionClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn generate(
        &self,
        system_prompt: &str,
        query: &str,
        context: &str,
    ) -> Result<TokenStream, GenerationError> {
        let prompt = build_prompt(system_prompt, query, context);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PromptRequest { prompt: &prompt })
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

        let completion: PromptResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let answer = strip_reasoning(&completion.response);
        tracing::debug!(answer_chars = answer.len(), "Prompt completion received");

        let fragments = if answer.is_empty() {
            vec![Ok(EMPTY_ANSWER_FALLBACK.to_string())]
        } else {
            match classify_fragment(answer) {
                Ok(answer) => replay_words(&answer),
                Err(marker) => {
                    tracing::warn!("Backend relayed an upstream failure as its answer");
                    vec![Err(marker)]
                }
            }
        };

        Ok(Box::pin(futures::stream::iter(fragments)))
    }
}
