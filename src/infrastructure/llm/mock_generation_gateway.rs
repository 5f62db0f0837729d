use std::sync::Mutex;

use futures::stream::{self, StreamExt};

use crate::application::ports::{GenerationError, GenerationGateway, TokenStream};

/// Scripted generation backend for tests and offline runs.
pub struct MockGenerationGateway {
    fragments: Vec<String>,
    open_failure: Option<String>,
    trailing_failure: Option<String>,
    trailing_marker: Option<String>,
    stalls: bool,
    last_context: Mutex<Option<String>>,
}

impl MockGenerationGateway {
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            open_failure: None,
            trailing_failure: None,
            trailing_marker: None,
            stalls: false,
            last_context: Mutex::new(None),
        }
    }

    pub fn failing_to_open(message: impl Into<String>) -> Self {
        Self {
            open_failure: Some(message.into()),
            ..Self::with_fragments(Vec::<String>::new())
        }
    }

    /// Yields the scripted fragments, then an error item.
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.trailing_failure = Some(message.into());
        self
    }

    /// Yields the scripted fragments, then a relayed failure report.
    pub fn then_report(mut self, marker: impl Into<String>) -> Self {
        self.trailing_marker = Some(marker.into());
        self
    }

    /// Yields the scripted fragments, then never finishes.
    pub fn then_stall(mut self) -> Self {
        self.stalls = true;
        self
    }

    pub fn last_context(&self) -> Option<String> {
        self.last_context.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait::async_trait]
impl GenerationGateway for MockGenerationGateway {
    async fn generate(
        &self,
        _system_prompt: &str,
        _query: &str,
        context: &str,
    ) -> Result<TokenStream, GenerationError> {
        if let Ok(mut guard) = self.last_context.lock() {
            *guard = Some(context.to_string());
        }

        if let Some(message) = &self.open_failure {
            return Err(GenerationError::ApiRequestFailed(message.clone()));
        }

        let mut items: Vec<Result<String, GenerationError>> =
            self.fragments.iter().cloned().map(Ok).collect();
        if let Some(marker) = &self.trailing_marker {
            items.push(Err(GenerationError::ErrorMarker(marker.clone())));
        }
        if let Some(message) = &self.trailing_failure {
            items.push(Err(GenerationError::ApiRequestFailed(message.clone())));
        }

        let scripted = stream::iter(items);
        if self.stalls {
            Ok(Box::pin(scripted.chain(stream::pending())))
        } else {
            Ok(Box::pin(scripted))
        }
    }
}
