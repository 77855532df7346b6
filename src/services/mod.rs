pub mod customer_service;
pub mod event_service;
pub mod llm_logger;
pub mod summarizer;

pub use customer_service::CustomerService;
pub use event_service::EventService;
pub use llm_logger::LlmCallLogger;
pub use summarizer::{OpenAiConfig, OpenAiSummarizer, SummarizationEngine};
