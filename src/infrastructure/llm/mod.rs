mod generation_factory;
mod mock_embedder;
mod mock_generation_gateway;
mod openai_embedder;
mod prompt_completion_client;
mod streaming_client;

pub use generation_factory::create_generation_gateway;
pub use mock_embedder::{FailingEmbedder, MockEmbedder};
pub use mock_generation_gateway::MockGenerationGateway;
pub use openai_embedder::OpenAiEmbedder;
pub use prompt_completion_client::{
    EMPTY_ANSWER_FALLBACK, PromptCompletionClient, build_prompt, strip_reasoning,
};
pub use streaming_client::{StreamingLlmClient, create_streaming_llm_client};
