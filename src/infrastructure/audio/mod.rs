mod mock_speech_gateway;
mod mock_transcription_engine;
mod openai_speech_engine;
mod openai_whisper_engine;

pub use mock_speech_gateway::MockSpeechGateway;
pub use mock_transcription_engine::MockTranscriptionEngine;
pub use openai_speech_engine::OpenAiSpeechEngine;
pub use openai_whisper_engine::{DEFAULT_MIN_AUDIO_BYTES, OpenAiWhisperEngine};
