use async_trait::async_trait;

use super::{SearchResult, VectorStoreError};
use crate::domain::{Embedding, TenantId};

/// Nearest-neighbour lookup over one tenant's documents.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn search(
        &self,
        tenant_id: TenantId,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;
}
