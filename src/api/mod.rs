pub mod customers;
pub mod events;
pub mod health;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{SpeakerLabelExtractor, SummaryOrchestrator};
use crate::repositories::{
    CustomerDirectory, EventStore, InMemoryCustomerDirectory, InMemoryEventStore,
    InMemorySummaryCache, PgCustomerDirectory, PgEventStore, PgSummaryCache, SummaryCache,
};
use crate::services::{CustomerService, EventService, SummarizationEngine};

#[derive(Clone)]
pub struct AppState {
    pub events: EventService,
    pub customers: CustomerService,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerDirectory>,
        events: Arc<dyn EventStore>,
        summaries: Arc<dyn SummaryCache>,
        engine: Arc<dyn SummarizationEngine>,
        engine_timeout: Duration,
    ) -> Self {
        let orchestrator = SummaryOrchestrator::new(events.clone(), summaries, engine)
            .with_engine_timeout(engine_timeout);
        let event_service = EventService::new(
            customers.clone(),
            events,
            Arc::new(SpeakerLabelExtractor),
            Arc::new(orchestrator),
        );

        Self {
            customers: CustomerService::new(customers, event_service.clone()),
            events: event_service,
        }
    }

    pub fn postgres(
        pool: PgPool,
        engine: Arc<dyn SummarizationEngine>,
        engine_timeout: Duration,
    ) -> Self {
        Self::new(
            Arc::new(PgCustomerDirectory::new(pool.clone())),
            Arc::new(PgEventStore::new(pool.clone())),
            Arc::new(PgSummaryCache::new(pool)),
            engine,
            engine_timeout,
        )
    }

    pub fn in_memory(engine: Arc<dyn SummarizationEngine>, engine_timeout: Duration) -> Self {
        Self::new(
            Arc::new(InMemoryCustomerDirectory::new()),
            Arc::new(InMemoryEventStore::new()),
            Arc::new(InMemorySummaryCache::new()),
            engine,
            engine_timeout,
        )
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route(
            "/api/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/api/events/meetings", post(events::create_meeting))
        .route(
            "/api/events/customer/{customer_id}",
            get(events::list_customer_events),
        )
        .route(
            "/api/events/{id}",
            get(events::get_event).delete(events::delete_event),
        )
        .route(
            "/api/events/{id}/summary",
            get(events::get_summary).post(events::generate_summary),
        )
        .route(
            "/api/events/{id}/summary/regenerate",
            post(events::regenerate_summary),
        )
        .with_state(state)
}
