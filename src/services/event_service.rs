use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::{ParticipantExtractor, SummaryOrchestrator, SummaryState};
use crate::error::{LifecycleError, Result};
use crate::models::{CreateMeeting, Event, EventTimestamp, EventType, Summary};
use crate::repositories::{CustomerDirectory, EventStore};

/// Request/response surface over events and their summaries.
#[derive(Clone)]
pub struct EventService {
    customers: Arc<dyn CustomerDirectory>,
    events: Arc<dyn EventStore>,
    extractor: Arc<dyn ParticipantExtractor>,
    orchestrator: Arc<SummaryOrchestrator>,
}

impl EventService {
    pub fn new(
        customers: Arc<dyn CustomerDirectory>,
        events: Arc<dyn EventStore>,
        extractor: Arc<dyn ParticipantExtractor>,
        orchestrator: Arc<SummaryOrchestrator>,
    ) -> Self {
        Self {
            customers,
            events,
            extractor,
            orchestrator,
        }
    }

    pub async fn create_meeting(&self, payload: CreateMeeting) -> Result<Event> {
        self.create_event(
            payload.customer_id,
            EventType::Meeting,
            payload.timestamp.as_deref(),
            payload.location,
            payload.transcript,
        )
        .await
    }

    /// Records a new event. No summary is generated here.
    pub async fn create_event(
        &self,
        customer_id: Uuid,
        event_type: EventType,
        timestamp: Option<&str>,
        location: Option<String>,
        transcript: Option<String>,
    ) -> Result<Event> {
        let timestamp = timestamp
            .ok_or_else(|| LifecycleError::validation("timestamp is required"))
            .and_then(|raw| EventTimestamp::parse(raw).map_err(LifecycleError::Validation))?;

        if !self.customers.exists(customer_id).await? {
            return Err(LifecycleError::validation(format!(
                "Customer {} does not exist",
                customer_id
            )));
        }

        let participants = transcript
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(|text| self.extractor.extract(text));
        debug!("Derived participants: {:?}", participants);

        let event = Event::new(
            customer_id,
            event_type,
            timestamp,
            location,
            transcript,
            participants,
        );
        self.events.insert(&event).await?;

        info!(
            "Created {} event {} for customer {}",
            event.event_type.as_str(),
            event.id,
            customer_id
        );

        Ok(event)
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| LifecycleError::event_not_found(event_id))
    }

    pub async fn list_events_for_customer(&self, customer_id: Uuid) -> Result<Vec<Event>> {
        if !self.customers.exists(customer_id).await? {
            return Err(LifecycleError::validation(format!(
                "Customer {} does not exist",
                customer_id
            )));
        }

        Ok(self.events.list_by_customer(customer_id).await?)
    }

    /// Deletes the event and cascades to its summary. Not idempotent.
    pub async fn delete_event(&self, event_id: Uuid) -> Result<()> {
        self.orchestrator.delete_event(event_id).await
    }

    pub async fn get_summary(&self, event_id: Uuid) -> Result<Summary> {
        self.orchestrator.get_summary(event_id).await
    }

    pub async fn summary_state(&self, event_id: Uuid) -> Result<SummaryState> {
        self.orchestrator.state(event_id).await
    }

    pub async fn generate_summary(&self, event_id: Uuid) -> Result<Summary> {
        self.orchestrator.generate(event_id).await
    }

    pub async fn regenerate_summary(&self, event_id: Uuid) -> Result<Summary> {
        self.orchestrator.regenerate(event_id).await
    }
}
