use serde_json::json;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError};
use crate::domain::{ContextPassage, Embedding, Provenance, TenantId};

/// In-memory store returning a fixed result set for every tenant.
pub struct MockVectorStore {
    results: Vec<SearchResult>,
    fails: bool,
}

impl MockVectorStore {
    pub fn new() -> Self {
        Self::with_passages(vec![ContextPassage::new(
            "Rust is a systems programming language focused on safety and performance.",
            Provenance::new("rust_notes.pdf").with_field("page", json!(1)),
        )])
    }

    pub fn with_passages(passages: Vec<ContextPassage>) -> Self {
        let results = passages
            .into_iter()
            .map(|passage| SearchResult {
                passage,
                score: 0.95,
            })
            .collect();
        Self {
            results,
            fails: false,
        }
    }

    pub fn empty() -> Self {
        Self::with_passages(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            results: Vec::new(),
            fails: true,
        }
    }
}

impl Default for MockVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VectorStore for MockVectorStore {
    async fn search(
        &self,
        _tenant_id: TenantId,
        _embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        if self.fails {
            return Err(VectorStoreError::ConnectionFailed(
                "vector index unreachable".to_string(),
            ));
        }
        Ok(self.results.iter().take(top_k).cloned().collect())
    }
}
