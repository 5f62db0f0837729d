mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    EmbeddingsSettings, LlmSettings, LoggingSettings, QdrantSettings, ServerSettings, Settings,
    SpeechSettings, TranscriptionSettings, TurnSettings,
};
