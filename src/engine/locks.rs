use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

type Slot = Arc<AsyncMutex<()>>;

/// Per-event mutual exclusion.
///
/// Waiters on one event are served in arrival order (tokio's mutex is fair).
/// Slots are created on demand and dropped once nobody holds or awaits them.
#[derive(Clone, Default)]
pub struct EventLocks {
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
}

pub struct EventLockGuard {
    event_id: Uuid,
    guard: Option<OwnedMutexGuard<()>>,
    slots: Arc<Mutex<HashMap<Uuid, Slot>>>,
}

impl EventLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, event_id: Uuid) -> EventLockGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.entry(event_id).or_default().clone()
        };

        let guard = slot.lock_owned().await;
        debug!("Acquired lock for event {}", event_id);

        EventLockGuard {
            event_id,
            guard: Some(guard),
            slots: self.slots.clone(),
        }
    }

    /// Number of events with a live slot.
    pub fn active(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Drop for EventLockGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = slots.get(&self.event_id) {
            // Only the map still references the slot: no holder, no waiter.
            if Arc::strong_count(slot) == 1 {
                slots.remove(&self.event_id);
            }
        }
        debug!("Released lock for event {}", self.event_id);
    }
}
