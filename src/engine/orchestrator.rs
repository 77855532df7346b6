use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::engine::locks::EventLocks;
use crate::error::{EngineError, LifecycleError, Result};
use crate::models::Summary;
use crate::repositories::{EventStore, SummaryCache};
use crate::services::summarizer::SummarizationEngine;

pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(60);

/// Externally observable summary state of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    NoSummary,
    SummaryPresent,
}

/// Decides when the summarization engine runs and reconciles its results
/// into the summary cache.
///
/// Generation and deletion of the same event are serialized through
/// [`EventLocks`]; the engine call happens while holding only that event's
/// lock. A failed or timed-out engine call never touches the cache.
pub struct SummaryOrchestrator {
    events: Arc<dyn EventStore>,
    summaries: Arc<dyn SummaryCache>,
    engine: Arc<dyn SummarizationEngine>,
    locks: EventLocks,
    engine_timeout: Duration,
}

impl SummaryOrchestrator {
    pub fn new(
        events: Arc<dyn EventStore>,
        summaries: Arc<dyn SummaryCache>,
        engine: Arc<dyn SummarizationEngine>,
    ) -> Self {
        Self {
            events,
            summaries,
            engine,
            locks: EventLocks::new(),
            engine_timeout: DEFAULT_ENGINE_TIMEOUT,
        }
    }

    pub fn with_engine_timeout(mut self, timeout: Duration) -> Self {
        self.engine_timeout = timeout;
        self
    }

    pub fn locks(&self) -> &EventLocks {
        &self.locks
    }

    pub async fn state(&self, event_id: Uuid) -> Result<SummaryState> {
        Ok(match self.summaries.get(event_id).await? {
            Some(_) => SummaryState::SummaryPresent,
            None => SummaryState::NoSummary,
        })
    }

    /// Cached summary only; a miss is reported, never filled.
    pub async fn get_summary(&self, event_id: Uuid) -> Result<Summary> {
        self.summaries
            .get(event_id)
            .await?
            .ok_or_else(|| LifecycleError::summary_not_found(event_id))
    }

    /// Generates a summary, replacing any previous one.
    ///
    /// From the caller's side this is the same operation as
    /// [`regenerate`](Self::regenerate).
    pub async fn generate(&self, event_id: Uuid) -> Result<Summary> {
        let _guard = self.locks.acquire(event_id).await;

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| LifecycleError::event_not_found(event_id))?;

        let transcript = event.summarizable_transcript().ok_or_else(|| {
            LifecycleError::precondition(format!(
                "Nothing to summarize: event {} has no transcript",
                event_id
            ))
        })?;

        let summary = match tokio::time::timeout(
            self.engine_timeout,
            self.engine.summarize(event_id, transcript),
        )
        .await
        {
            Ok(Ok(summary)) => summary,
            Ok(Err(err)) => {
                warn!("Summarization failed for event {}: {}", event_id, err);
                return Err(err.into());
            }
            Err(_) => {
                warn!(
                    "Summarization for event {} timed out after {:?}",
                    event_id, self.engine_timeout
                );
                return Err(EngineError::Timeout(self.engine_timeout).into());
            }
        };

        if let Err(err) = self.summaries.put(event_id, &summary).await {
            error!("Failed to store summary for event {}: {}", event_id, err);
            return Err(err.into());
        }

        info!(
            "Stored summary for event {} (sentiment: {})",
            event_id, summary.sentiment
        );

        Ok(summary)
    }

    pub async fn regenerate(&self, event_id: Uuid) -> Result<Summary> {
        self.generate(event_id).await
    }

    /// Deletes an event and its summary once any in-flight generation for
    /// the same event has finished.
    pub async fn delete_event(&self, event_id: Uuid) -> Result<()> {
        let _guard = self.locks.acquire(event_id).await;

        if !self.events.delete(event_id).await? {
            return Err(LifecycleError::event_not_found(event_id));
        }

        if let Err(err) = self.summaries.delete(event_id).await {
            error!(
                "Event {} deleted but its summary could not be removed: {}",
                event_id, err
            );
            return Err(err.into());
        }

        info!("Deleted event {} and its summary", event_id);
        Ok(())
    }
}
