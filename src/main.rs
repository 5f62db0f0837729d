use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use voxrag::application::services::{TurnOrchestrator, VectorRetrievalGateway};
use voxrag::infrastructure::audio::{OpenAiSpeechEngine, OpenAiWhisperEngine};
use voxrag::infrastructure::llm::{OpenAiEmbedder, create_generation_gateway};
use voxrag::infrastructure::observability::{TracingConfig, init_tracing};
use voxrag::infrastructure::persistence::QdrantAdapter;
use voxrag::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let embedder = Arc::new(OpenAiEmbedder::new(
        settings.embeddings.base_url.clone(),
        settings.embeddings.api_key.clone(),
        settings.embeddings.model.clone(),
    ));
    let vector_store = Arc::new(
        QdrantAdapter::new(
            &settings.qdrant.url,
            settings.qdrant.collection_prefix.clone(),
        )
        .context("failed to configure Qdrant client")?,
    );
    let retrieval = Arc::new(VectorRetrievalGateway::new(embedder, vector_store));

    let generation =
        create_generation_gateway(&settings.llm).context("failed to configure generation")?;

    let speech = Arc::new(OpenAiSpeechEngine::new(
        settings.speech.api_key.clone(),
        settings.speech.base_url.clone(),
        settings.speech.model.clone(),
        settings.speech.voice.clone(),
        settings.speech.response_format.clone(),
    ));

    let transcription_engine = Arc::new(
        OpenAiWhisperEngine::new(
            settings.transcription.api_key.clone(),
            settings.transcription.base_url.clone(),
            Some(settings.transcription.model.clone()),
        )
        .with_min_audio_bytes(settings.transcription.min_audio_bytes),
    );

    let orchestrator = Arc::new(TurnOrchestrator::new(
        retrieval,
        generation,
        speech,
        settings.turn.top_k,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        orchestrator,
        transcription_engine,
        settings: Arc::new(settings),
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
