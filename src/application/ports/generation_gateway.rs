use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

/// Lazy, single-pass sequence of generated text fragments.
pub type TokenStream =
    Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send + 'static>>;

#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// An `Err` here means the sequence could not be opened at all. Failures
    /// after that point arrive as `Err` items inside the stream.
    async fn generate(
        &self,
        system_prompt: &str,
        query: &str,
        context: &str,
    ) -> Result<TokenStream, GenerationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("configuration: {0}")]
    Configuration(String),
    /// A fragment that is really an in-band failure report from the backend.
    #[error("{0}")]
    ErrorMarker(String),
}

const ERROR_MARKER_PREFIXES: [&str; 5] = [
    "\u{274c} [LLM",
    "[LLM Error]",
    "[LLM Hata]",
    "Connection Error:",
    "Ba\u{11f}lant\u{131} Hatas\u{131}:",
];

/// Some backends relay an upstream failure as the answer text itself. Adapters
/// for such backends run their text through this before yielding it, so the
/// report ends generation instead of being narrated. Streams that carry real
/// errors must not use it: content may legitimately start with these strings.
pub fn classify_fragment(fragment: String) -> Result<String, GenerationError> {
    let head = fragment.trim_start();
    if ERROR_MARKER_PREFIXES
        .iter()
        .any(|prefix| head.starts_with(prefix))
    {
        return Err(GenerationError::ErrorMarker(fragment));
    }
    Ok(fragment)
}
