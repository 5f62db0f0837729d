mod context_passage;
mod embedding;
mod tenant_id;
mod turn;
mod turn_event;

pub use context_passage::{ContextPassage, Provenance, UNKNOWN_SOURCE};
pub use embedding::Embedding;
pub use tenant_id::TenantId;
pub use turn::Turn;
pub use turn_event::{TurnEvent, TurnPhase};
