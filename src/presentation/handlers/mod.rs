mod chat;
mod health;
mod transcribe;

pub use chat::{ChatStreamRequest, ErrorResponse, chat_stream_handler};
pub use health::health_handler;
pub use transcribe::{TranscriptionResponse, transcribe_handler};
