use std::future::Future;
use std::sync::Arc;

use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{
    GenerationError, GenerationGateway, RetrievalGateway, RetrievedContext, SpeechGateway,
};
use crate::domain::{Turn, TurnEvent, TurnPhase};

use super::sentence_segmenter::{Sentence, SentenceSegmenter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Retrieving,
    Generating,
    Draining,
    Done,
    Errored,
}

/// How a turn ended, as seen from the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Stream terminated with `status(done)`.
    Completed,
    /// Stream terminated with `error(..)`.
    Errored,
    /// The consumer went away; nothing more was written.
    Abandoned,
}

#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("generation could not start: {0}")]
    GenerationOpen(GenerationError),
    #[error("event channel closed")]
    ChannelClosed,
}

/// Drives one conversational turn: retrieval, then generation fed through the
/// sentence segmenter, with each completed sentence narrated before the next
/// fragment is pulled.
///
/// Gateway failures never escape. Retrieval and synthesis failures degrade the
/// turn; only a generation stream that cannot be opened ends it with `error`.
pub struct TurnOrchestrator {
    retrieval: Arc<dyn RetrievalGateway>,
    generation: Arc<dyn GenerationGateway>,
    speech: Arc<dyn SpeechGateway>,
    top_k: usize,
}

impl TurnOrchestrator {
    pub fn new(
        retrieval: Arc<dyn RetrievalGateway>,
        generation: Arc<dyn GenerationGateway>,
        speech: Arc<dyn SpeechGateway>,
        top_k: usize,
    ) -> Self {
        Self {
            retrieval,
            generation,
            speech,
            top_k,
        }
    }

    /// Runs `turn` on its own task, writing into a fresh channel of `capacity` events.
    pub fn spawn(self: &Arc<Self>, turn: Turn, capacity: usize) -> mpsc::Receiver<TurnEvent> {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            orchestrator.run(turn, sender).await;
        });
        receiver
    }

    /// Runs the turn to completion. The sender is dropped on return, which
    /// closes the channel after the terminal event.
    pub async fn run(&self, turn: Turn, events: mpsc::Sender<TurnEvent>) -> TurnOutcome {
        let span = tracing::info_span!("turn", tenant_id = %turn.tenant_id);

        async move {
            tracing::debug!(query_chars = turn.query.len(), "Turn started");
            let mut progress = TurnProgress::new();
            let sink = EventSink::new(events);

            let result = self.drive(&turn, &sink, &mut progress).await;
            let outcome = match result {
                Ok(()) => TurnOutcome::Completed,
                Err(TurnError::GenerationOpen(error)) => {
                    tracing::error!(error = %error, "Generation stream could not be opened");
                    progress.advance(TurnState::Errored);
                    match sink.emit(TurnEvent::Error(error.to_string())).await {
                        Ok(()) => TurnOutcome::Errored,
                        Err(_) => TurnOutcome::Abandoned,
                    }
                }
                Err(TurnError::ChannelClosed) => TurnOutcome::Abandoned,
            };

            if outcome == TurnOutcome::Abandoned {
                tracing::info!(state = ?progress.state, "Client disconnected, turn abandoned");
            } else {
                tracing::info!(
                    outcome = ?outcome,
                    sentences = progress.sentences,
                    audio_spans = progress.audio_spans,
                    "Turn finished"
                );
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &self,
        turn: &Turn,
        sink: &EventSink,
        progress: &mut TurnProgress,
    ) -> Result<(), TurnError> {
        sink.emit(TurnEvent::Status(TurnPhase::Thinking)).await?;
        let retrieved = self.retrieve(turn, sink).await?;
        if !retrieved.is_empty() {
            sink.emit(TurnEvent::Sources(retrieved.provenance())).await?;
        }

        progress.advance(TurnState::Generating);
        sink.emit(TurnEvent::Status(TurnPhase::Speaking)).await?;
        let mut tokens = sink
            .unless_closed(self.generation.generate(
                &turn.system_prompt,
                &turn.query,
                &retrieved.context,
            ))
            .await?
            .map_err(TurnError::GenerationOpen)?;

        let mut segmenter = SentenceSegmenter::new();
        let mut received_any = false;

        while let Some(item) = sink.unless_closed(tokens.next()).await? {
            match item {
                Ok(fragment) => {
                    received_any = true;
                    let completed = segmenter.feed(&fragment);
                    sink.emit(TurnEvent::Token(fragment)).await?;
                    for sentence in completed {
                        self.narrate(&sentence, sink, progress).await?;
                    }
                }
                Err(GenerationError::ErrorMarker(marker)) => {
                    // Clients still see the backend's text; it is just not spoken.
                    tracing::warn!(
                        marker_chars = marker.len(),
                        "Generation reported failure in-band"
                    );
                    sink.emit(TurnEvent::Token(marker)).await?;
                    break;
                }
                Err(error) if !received_any => return Err(TurnError::GenerationOpen(error)),
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        "Generation failed mid-stream, keeping partial answer"
                    );
                    break;
                }
            }
        }
        drop(tokens);

        progress.advance(TurnState::Draining);
        if let Some(rest) = segmenter.flush() {
            self.narrate(&rest, sink, progress).await?;
        }

        sink.emit(TurnEvent::Status(TurnPhase::Done)).await?;
        progress.advance(TurnState::Done);
        Ok(())
    }

    async fn retrieve(&self, turn: &Turn, sink: &EventSink) -> Result<RetrievedContext, TurnError> {
        let result = sink
            .unless_closed(self.retrieval.retrieve(turn.tenant_id, &turn.query, self.top_k))
            .await?;

        Ok(match result {
            Ok(retrieved) => {
                tracing::debug!(passages = retrieved.passages.len(), "Context retrieved");
                retrieved
            }
            Err(error) => {
                tracing::warn!(error = %error, "Retrieval failed, answering without context");
                RetrievedContext::empty()
            }
        })
    }

    async fn narrate(
        &self,
        sentence: &Sentence,
        sink: &EventSink,
        progress: &mut TurnProgress,
    ) -> Result<(), TurnError> {
        if sentence.is_blank() {
            return Ok(());
        }
        progress.sentences += 1;

        match sink.unless_closed(self.speech.synthesize(sentence.text())).await? {
            Ok(audio) if audio.is_empty() => {
                tracing::debug!("No audio for sentence");
            }
            Ok(audio) => {
                sink.emit(TurnEvent::audio(&audio)).await?;
                progress.audio_spans += 1;
            }
            Err(error) => {
                tracing::warn!(error = %error, "Synthesis failed, skipping audio for sentence");
            }
        }
        Ok(())
    }
}

struct TurnProgress {
    state: TurnState,
    sentences: usize,
    audio_spans: usize,
}

impl TurnProgress {
    fn new() -> Self {
        Self {
            state: TurnState::Retrieving,
            sentences: 0,
            audio_spans: 0,
        }
    }

    fn advance(&mut self, next: TurnState) {
        tracing::debug!(from = ?self.state, to = ?next, "Turn state change");
        self.state = next;
    }
}

/// Bounded, order-preserving writer. A full channel suspends the turn; a
/// closed one ends it.
struct EventSink {
    sender: mpsc::Sender<TurnEvent>,
}

impl EventSink {
    fn new(sender: mpsc::Sender<TurnEvent>) -> Self {
        Self { sender }
    }

    async fn emit(&self, event: TurnEvent) -> Result<(), TurnError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| TurnError::ChannelClosed)
    }

    /// Awaits `future` unless the consumer disconnects first, in which case
    /// the future is dropped mid-flight.
    async fn unless_closed<F: Future>(&self, future: F) -> Result<F::Output, TurnError> {
        tokio::select! {
            biased;
            _ = self.sender.closed() => Err(TurnError::ChannelClosed),
            output = future => Ok(output),
        }
    }
}
