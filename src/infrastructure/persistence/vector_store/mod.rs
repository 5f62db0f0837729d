mod mock_vector_store;
mod qdrant_adapter;

pub use mock_vector_store::MockVectorStore;
pub use qdrant_adapter::{QdrantAdapter, passage_from_payload};
