pub mod customer;
pub mod event;
pub mod summary;

pub use customer::{CreateCustomer, Customer, UpdateCustomer};
pub use event::{CreateMeeting, Event, EventTimestamp, EventType};
pub use summary::{Sentiment, Summary};
