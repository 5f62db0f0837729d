use std::sync::Arc;

use serde_json::json;

use voxrag::application::ports::{RetrievalError, RetrievalGateway};
use voxrag::application::services::VectorRetrievalGateway;
use voxrag::domain::{ContextPassage, Provenance, TenantId};
use voxrag::infrastructure::llm::{FailingEmbedder, MockEmbedder};
use voxrag::infrastructure::persistence::MockVectorStore;

fn gateway(store: MockVectorStore) -> VectorRetrievalGateway {
    VectorRetrievalGateway::new(Arc::new(MockEmbedder), Arc::new(store))
}

#[tokio::test]
async fn given_matching_passages_when_retrieving_then_context_is_tagged_and_separated() {
    let store = MockVectorStore::with_passages(vec![
        ContextPassage::new(
            "Ownership moves values.\nBorrowing lends them.",
            Provenance::new("book.pdf").with_field("page", json!(4)),
        ),
        ContextPassage::new("Lifetimes bound references.", Provenance::new("notes.md")),
    ]);

    let retrieved = gateway(store)
        .retrieve(TenantId::new(1), "ownership", 5)
        .await
        .unwrap();

    assert_eq!(
        retrieved.context,
        "[SOURCE: book.pdf]\nOwnership moves values. Borrowing lends them.\
         \n\n---\n\n[SOURCE: notes.md]\nLifetimes bound references."
    );
    let sources: Vec<String> = retrieved.provenance().into_iter().map(|p| p.source).collect();
    assert_eq!(sources, vec!["book.pdf", "notes.md"]);
    assert_eq!(retrieved.passages[0].provenance.metadata.get("page"), Some(&json!(4)));
}

#[tokio::test]
async fn given_more_passages_than_k_when_retrieving_then_at_most_k_returned() {
    let passages = (0..5)
        .map(|i| ContextPassage::new(format!("passage {i}"), Provenance::new("doc.txt")))
        .collect();

    let retrieved = gateway(MockVectorStore::with_passages(passages))
        .retrieve(TenantId::new(1), "anything", 2)
        .await
        .unwrap();

    assert_eq!(retrieved.passages.len(), 2);
    assert_eq!(retrieved.passages[0].text, "passage 0");
}

#[tokio::test]
async fn given_no_matches_when_retrieving_then_context_is_empty_not_error() {
    let retrieved = gateway(MockVectorStore::empty())
        .retrieve(TenantId::new(1), "unknown topic", 3)
        .await
        .unwrap();

    assert!(retrieved.is_empty());
    assert_eq!(retrieved.context, "");
}

#[tokio::test]
async fn given_embedder_failure_when_retrieving_then_embedding_error() {
    let gateway =
        VectorRetrievalGateway::new(Arc::new(FailingEmbedder), Arc::new(MockVectorStore::new()));

    let result = gateway.retrieve(TenantId::new(1), "query", 3).await;

    assert!(matches!(result, Err(RetrievalError::Embedding(_))));
}

#[tokio::test]
async fn given_store_failure_when_retrieving_then_search_error() {
    let result = gateway(MockVectorStore::failing())
        .retrieve(TenantId::new(1), "query", 3)
        .await;

    assert!(matches!(result, Err(RetrievalError::Search(_))));
}
