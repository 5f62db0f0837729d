use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SpeechGateway: Send + Sync {
    /// Audio for exactly this span of text. Empty bytes mean "no audio for
    /// this span" and are not an error.
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("speech rate limited")]
    RateLimited,
    #[error("invalid speech response: {0}")]
    InvalidResponse(String),
}
