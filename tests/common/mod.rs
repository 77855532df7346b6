#![allow(dead_code)]

use async_trait::async_trait;
use prancing_pony::engine::{SpeakerLabelExtractor, SummaryOrchestrator};
use prancing_pony::models::{CreateCustomer, Customer, CreateMeeting, Sentiment, Summary};
use prancing_pony::repositories::{
    CustomerDirectory, InMemoryCustomerDirectory, InMemoryEventStore, InMemorySummaryCache,
};
use prancing_pony::services::{EventService, SummarizationEngine};
use prancing_pony::EngineError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

struct Step {
    delay: Duration,
    result: Result<Summary, EngineError>,
}

/// Engine that plays back queued results, one per call.
#[derive(Default)]
pub struct ScriptedEngine {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, summary: Summary) {
        self.push(Duration::ZERO, Ok(summary));
    }

    pub fn reply_after(&self, delay: Duration, summary: Summary) {
        self.push(delay, Ok(summary));
    }

    pub fn fail(&self, err: EngineError) {
        self.push(Duration::ZERO, Err(err));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, delay: Duration, result: Result<Summary, EngineError>) {
        self.steps.lock().unwrap().push_back(Step { delay, result });
    }
}

#[async_trait]
impl SummarizationEngine for ScriptedEngine {
    async fn summarize(&self, _event_id: Uuid, _transcript: &str) -> Result<Summary, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                tokio::time::sleep(step.delay).await;
                step.result
            }
            None => Err(EngineError::Unavailable("no scripted response".to_string())),
        }
    }
}

pub fn friday_summary() -> Summary {
    Summary::new(
        "Team commits to Friday ship date",
        vec!["Ship by Friday".to_string()],
        Sentiment::Green,
        "Agreement reached",
    )
}

pub fn amber_summary() -> Summary {
    Summary::new(
        "Friday ship date holds with reservations",
        vec!["Ship by Friday".to_string(), "Review QA capacity".to_string()],
        Sentiment::Amber,
        "Some concern about testing time",
    )
}

pub struct Harness {
    pub service: EventService,
    pub customers: Arc<InMemoryCustomerDirectory>,
    pub events: Arc<InMemoryEventStore>,
    pub summaries: Arc<InMemorySummaryCache>,
    pub engine: Arc<ScriptedEngine>,
    pub orchestrator: Arc<SummaryOrchestrator>,
    pub customer_id: Uuid,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5)).await
    }

    pub async fn with_timeout(timeout: Duration) -> Self {
        let customers = Arc::new(InMemoryCustomerDirectory::new());
        let events = Arc::new(InMemoryEventStore::new());
        let summaries = Arc::new(InMemorySummaryCache::new());
        let engine = ScriptedEngine::new();

        let orchestrator = Arc::new(
            SummaryOrchestrator::new(events.clone(), summaries.clone(), engine.clone())
                .with_engine_timeout(timeout),
        );
        let service = EventService::new(
            customers.clone(),
            events.clone(),
            Arc::new(SpeakerLabelExtractor),
            orchestrator.clone(),
        );

        let customer = Customer::new(CreateCustomer {
            organization_name: "Bree Trading Co".to_string(),
            ..Default::default()
        });
        customers.create(&customer).await.unwrap();

        Self {
            service,
            customers,
            events,
            summaries,
            engine,
            orchestrator,
            customer_id: customer.id,
        }
    }

    pub fn meeting(&self, timestamp: &str, transcript: Option<&str>) -> CreateMeeting {
        CreateMeeting {
            customer_id: self.customer_id,
            timestamp: Some(timestamp.to_string()),
            location: Some("The Prancing Pony, Bree".to_string()),
            transcript: transcript.map(str::to_string),
        }
    }
}
