use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Event;

/// Durable record of events per customer.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert(&self, event: &Event) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// Snapshot of a customer's events, timestamp ascending with id as tie-break.
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Event>>;

    /// Returns `false` when no event had this id.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn insert(&self, event: &Event) -> Result<()> {
        sqlx::query(
            "INSERT INTO events (id, customer_id, event_type, timestamp, occurred_at, location, transcript, participants, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        )
        .bind(event.id)
        .bind(event.customer_id)
        .bind(event.event_type.as_str())
        .bind(event.timestamp.as_str())
        .bind(event.timestamp.wall_clock())
        .bind(&event.location)
        .bind(&event.transcript)
        .bind(event.participants.as_ref().map(sqlx::types::Json))
        .bind(event.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE customer_id = $1 ORDER BY occurred_at ASC, id ASC"
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
