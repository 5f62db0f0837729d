mod vector_store;

pub use vector_store::{MockVectorStore, QdrantAdapter, passage_from_payload};
