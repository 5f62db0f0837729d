use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;

use super::Provenance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    Thinking,
    Speaking,
    Done,
}

/// One entry of a turn's outbound stream.
///
/// Serializes as `{"type": "...", "data": ...}`. Audio is carried as base64
/// text so the stream stays text-safe; ordering is positional, there are no
/// sequence numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum TurnEvent {
    Status(TurnPhase),
    Sources(Vec<Provenance>),
    Token(String),
    Audio(String),
    Error(String),
}

impl TurnEvent {
    pub fn audio(bytes: &[u8]) -> Self {
        Self::Audio(general_purpose::STANDARD.encode(bytes))
    }

    /// `status(done)` and `error(..)` end a stream; nothing may follow them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Status(TurnPhase::Done) | Self::Error(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Sources(_) => "sources",
            Self::Token(_) => "token",
            Self::Audio(_) => "audio",
            Self::Error(_) => "error",
        }
    }
}
