use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Summary;

/// Keyed store holding at most one summary per event.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    async fn get(&self, event_id: Uuid) -> Result<Option<Summary>>;

    /// Last write wins; any previous summary for the event is replaced.
    async fn put(&self, event_id: Uuid, summary: &Summary) -> Result<()>;

    /// No-op when nothing is stored for the event.
    async fn delete(&self, event_id: Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct PgSummaryCache {
    pool: PgPool,
}

impl PgSummaryCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SummaryCache for PgSummaryCache {
    async fn get(&self, event_id: Uuid) -> Result<Option<Summary>> {
        let row: Option<(Json<Summary>,)> =
            sqlx::query_as("SELECT summary_json FROM event_summaries WHERE event_id = $1")
                .bind(event_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(Json(summary),)| summary))
    }

    async fn put(&self, event_id: Uuid, summary: &Summary) -> Result<()> {
        sqlx::query(
            "INSERT INTO event_summaries (event_id, summary_json, generated_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (event_id) DO UPDATE SET summary_json = EXCLUDED.summary_json, generated_at = EXCLUDED.generated_at"
        )
        .bind(event_id)
        .bind(Json(summary))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, event_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM event_summaries WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
