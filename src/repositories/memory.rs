//! In-memory stores, used when no database is configured and in tests.
//! Nothing here survives a process restart.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::event::sort_timeline;
use crate::models::{Customer, Event, Summary};

use super::{CustomerDirectory, EventStore, SummaryCache};

#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn insert(&self, event: &Event) -> Result<()> {
        self.events.write().await.insert(event.id, event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .values()
            .filter(|event| event.customer_id == customer_id)
            .cloned()
            .collect();
        sort_timeline(&mut events);
        Ok(events)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.events.write().await.remove(&id).is_some())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySummaryCache {
    summaries: Arc<RwLock<HashMap<Uuid, Summary>>>,
}

impl InMemorySummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.summaries.read().await.len()
    }
}

#[async_trait]
impl SummaryCache for InMemorySummaryCache {
    async fn get(&self, event_id: Uuid) -> Result<Option<Summary>> {
        Ok(self.summaries.read().await.get(&event_id).cloned())
    }

    async fn put(&self, event_id: Uuid, summary: &Summary) -> Result<()> {
        self.summaries
            .write()
            .await
            .insert(event_id, summary.clone());
        Ok(())
    }

    async fn delete(&self, event_id: Uuid) -> Result<()> {
        self.summaries.write().await.remove(&event_id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCustomerDirectory {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerDirectory for InMemoryCustomerDirectory {
    async fn create(&self, customer: &Customer) -> Result<()> {
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Customer>> {
        let mut customers: Vec<Customer> = self.customers.read().await.values().cloned().collect();
        customers.sort_by(|a, b| {
            a.organization_name
                .cmp(&b.organization_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(customers)
    }

    async fn update(&self, customer: &Customer) -> Result<()> {
        if let Some(existing) = self.customers.write().await.get_mut(&customer.id) {
            *existing = customer.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.customers.write().await.remove(&id).is_some())
    }
}
