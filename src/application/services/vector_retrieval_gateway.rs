use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    Embedder, RetrievalError, RetrievalGateway, RetrievedContext, SearchResult, VectorStore,
};
use crate::domain::TenantId;

const PASSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Retrieval backed by an embedder and a per-tenant vector index.
pub struct VectorRetrievalGateway {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
}

impl VectorRetrievalGateway {
    pub fn new(embedder: Arc<dyn Embedder>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            vector_store,
        }
    }
}

#[async_trait]
impl RetrievalGateway for VectorRetrievalGateway {
    #[tracing::instrument(skip(self, query), fields(tenant_id = %tenant_id, k = k))]
    async fn retrieve(
        &self,
        tenant_id: TenantId,
        query: &str,
        k: usize,
    ) -> Result<RetrievedContext, RetrievalError> {
        let query_embedding = self.embedder.embed(query).await?;

        let results = self
            .vector_store
            .search(tenant_id, &query_embedding, k)
            .await?;

        if results.is_empty() {
            tracing::debug!("No matching passages");
            return Ok(RetrievedContext::empty());
        }

        let context = results
            .iter()
            .map(format_passage)
            .collect::<Vec<_>>()
            .join(PASSAGE_SEPARATOR);

        let passages = results.into_iter().map(|r| r.passage).collect();

        Ok(RetrievedContext { context, passages })
    }
}

fn format_passage(result: &SearchResult) -> String {
    format!(
        "[SOURCE: {}]\n{}",
        result.passage.provenance.source,
        result.passage.text.replace('\n', " ")
    )
}
