mod sentence_segmenter;
mod turn_orchestrator;
mod vector_retrieval_gateway;

pub use sentence_segmenter::{Sentence, SentenceSegmenter};
pub use turn_orchestrator::{TurnError, TurnOrchestrator, TurnOutcome, TurnState};
pub use vector_retrieval_gateway::VectorRetrievalGateway;
