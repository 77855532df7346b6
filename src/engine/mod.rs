pub mod locks;
pub mod orchestrator;
pub mod participants;

pub use locks::EventLocks;
pub use orchestrator::{SummaryOrchestrator, SummaryState};
pub use participants::{extract_participants, ParticipantExtractor, SpeakerLabelExtractor};
