use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{GenerationError, GenerationGateway};
use crate::presentation::config::LlmSettings;

use super::{PromptCompletionClient, create_streaming_llm_client};

const PROMPT_PROVIDER: &str = "prompt";

pub fn create_generation_gateway(
    settings: &LlmSettings,
) -> Result<Arc<dyn GenerationGateway>, GenerationError> {
    if settings.provider == PROMPT_PROVIDER {
        let endpoint = settings.base_url.clone().ok_or_else(|| {
            GenerationError::Configuration("base_url required for prompt provider".to_string())
        })?;
        let client = PromptCompletionClient::new(
            endpoint,
            Duration::from_secs(settings.request_timeout_seconds),
        )?;
        tracing::info!(provider = PROMPT_PROVIDER, "Generation gateway configured");
        return Ok(Arc::new(client));
    }

    let client = create_streaming_llm_client(settings)?;
    tracing::info!(
        provider = %settings.provider,
        model = %settings.chat_model,
        "Generation gateway configured"
    );
    Ok(Arc::new(client))
}
