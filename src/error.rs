use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, LifecycleError>;

/// Failures reported by a summarization engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("summarization engine unavailable: {0}")]
    Unavailable(String),

    #[error("summarization timed out after {0:?}")]
    Timeout(Duration),

    #[error("summarization engine returned malformed output: {0}")]
    MalformedOutput(String),
}

/// Errors surfaced by the event and summary lifecycle.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LifecycleError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LifecycleError::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        LifecycleError::Precondition(msg.into())
    }

    pub fn event_not_found(id: Uuid) -> Self {
        LifecycleError::NotFound { entity: "Event", id }
    }

    pub fn summary_not_found(event_id: Uuid) -> Self {
        LifecycleError::NotFound {
            entity: "Summary for event",
            id: event_id,
        }
    }

    pub fn customer_not_found(id: Uuid) -> Self {
        LifecycleError::NotFound {
            entity: "Customer",
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LifecycleError::NotFound { .. })
    }
}
