use async_trait::async_trait;

use super::{EmbedderError, VectorStoreError};
use crate::domain::{ContextPassage, Provenance, TenantId};

/// Ranked context for one query: the prompt-ready context text and the
/// passages it was assembled from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedContext {
    pub context: String,
    pub passages: Vec<ContextPassage>,
}

impl RetrievedContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn provenance(&self) -> Vec<Provenance> {
        self.passages
            .iter()
            .map(|passage| passage.provenance.clone())
            .collect()
    }
}

#[async_trait]
pub trait RetrievalGateway: Send + Sync {
    /// No matches is `Ok` with an empty context, not an error.
    async fn retrieve(
        &self,
        tenant_id: TenantId,
        query: &str,
        k: usize,
    ) -> Result<RetrievedContext, RetrievalError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("retrieval unavailable: {0}")]
    Unavailable(String),
}
