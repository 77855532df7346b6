pub mod customer_repository;
pub mod event_repository;
pub mod memory;
pub mod summary_repository;

pub use customer_repository::{CustomerDirectory, PgCustomerDirectory};
pub use event_repository::{EventStore, PgEventStore};
pub use memory::{InMemoryCustomerDirectory, InMemoryEventStore, InMemorySummaryCache};
pub use summary_repository::{PgSummaryCache, SummaryCache};
