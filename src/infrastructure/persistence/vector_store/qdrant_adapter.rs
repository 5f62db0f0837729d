use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::SearchPointsBuilder;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError};
use crate::domain::{ContextPassage, Embedding, Provenance, TenantId};

const TEXT_FIELD: &str = "text";

/// Qdrant-backed index with one collection per tenant.
pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_prefix: String,
}

impl QdrantAdapter {
    pub fn new(url: &str, collection_prefix: String) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_prefix,
        })
    }

    pub fn collection_name(&self, tenant_id: TenantId) -> String {
        format!("{}_{}_docs", self.collection_prefix, tenant_id)
    }
}

/// Splits a stored payload into passage text and opaque provenance.
pub fn passage_from_payload(mut payload: Map<String, Value>) -> Option<ContextPassage> {
    let text = match payload.remove(TEXT_FIELD)? {
        Value::String(text) => text,
        _ => return None,
    };
    Some(ContextPassage::new(text, Provenance::from_metadata(payload)))
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, embedding), fields(tenant_id = %tenant_id, top_k = top_k))]
    async fn search(
        &self,
        tenant_id: TenantId,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let collection_name = self.collection_name(tenant_id);

        let exists = self
            .client
            .collection_exists(&collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;
        if !exists {
            tracing::debug!(collection = %collection_name, "Tenant has no collection yet");
            return Ok(Vec::new());
        }

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(&collection_name, embedding.values.clone(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let results: Vec<SearchResult> = search_result
            .result
            .into_iter()
            .filter_map(|point| {
                let payload: Map<String, Value> = point
                    .payload
                    .into_iter()
                    .map(|(key, value)| (key, value.into_json()))
                    .collect();

                let passage = passage_from_payload(payload)?;
                Some(SearchResult {
                    passage,
                    score: point.score,
                })
            })
            .collect();

        tracing::debug!(collection = %collection_name, hits = results.len(), "Search completed");
        Ok(results)
    }
}
