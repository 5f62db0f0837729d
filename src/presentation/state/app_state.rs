use std::sync::Arc;

use crate::application::ports::TranscriptionEngine;
use crate::application::services::TurnOrchestrator;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TurnOrchestrator>,
    pub transcription_engine: Arc<dyn TranscriptionEngine>,
    pub settings: Arc<Settings>,
}
