use std::collections::HashSet;
use std::sync::Mutex;

use bytes::Bytes;

use crate::application::ports::{SpeechGateway, SynthesisError};

/// Returns the span's own UTF-8 bytes as "audio" and remembers every request.
#[derive(Default)]
pub struct MockSpeechGateway {
    failing_spans: HashSet<String>,
    silent_spans: HashSet<String>,
    stalled_spans: HashSet<String>,
    silent: bool,
    requests: Mutex<Vec<String>>,
}

impl MockSpeechGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every span synthesizes to empty audio.
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    pub fn failing_for(mut self, span: impl Into<String>) -> Self {
        self.failing_spans.insert(span.into());
        self
    }

    pub fn silent_for(mut self, span: impl Into<String>) -> Self {
        self.silent_spans.insert(span.into());
        self
    }

    /// Synthesis of this span never completes.
    pub fn stalling_for(mut self, span: impl Into<String>) -> Self {
        self.stalled_spans.insert(span.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SpeechGateway for MockSpeechGateway {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SynthesisError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(text.to_string());
        }

        if self.stalled_spans.contains(text) {
            std::future::pending::<()>().await;
        }
        if self.failing_spans.contains(text) {
            return Err(SynthesisError::ApiRequestFailed("voice unavailable".to_string()));
        }
        if self.silent || self.silent_spans.contains(text) {
            return Ok(Bytes::new());
        }
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }
}
