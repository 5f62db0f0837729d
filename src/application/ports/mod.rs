mod embedder;
mod generation_gateway;
mod retrieval_gateway;
mod search_result;
mod speech_gateway;
mod transcription_engine;
mod vector_store;
mod vector_store_error;

pub use embedder::{Embedder, EmbedderError};
pub use generation_gateway::{GenerationError, GenerationGateway, TokenStream, classify_fragment};
pub use retrieval_gateway::{RetrievalError, RetrievalGateway, RetrievedContext};
pub use search_result::SearchResult;
pub use speech_gateway::{SpeechGateway, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
