use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{Sentiment, Summary};
use crate::services::llm_logger::LlmCallLogger;

const DEFAULT_PROMPT: &str = include_str!("../../prompts/meeting_summary.txt");
const PROMPT_FILE: &str = "meeting_summary.txt";

/// External component turning a transcript into a [`Summary`].
#[async_trait]
pub trait SummarizationEngine: Send + Sync {
    async fn summarize(&self, event_id: Uuid, transcript: &str) -> Result<Summary, EngineError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub prompts_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    response_format: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Shape the model is asked to produce; sentiment is checked separately so
/// that "Green" or "AMBER" are still accepted.
#[derive(Debug, Deserialize)]
struct RawSummary {
    tldr: String,
    #[serde(default)]
    action_items: Vec<String>,
    sentiment: String,
    sentiment_explanation: String,
}

/// Summarizes transcripts with the OpenAI chat completions API.
pub struct OpenAiSummarizer {
    client: Client,
    config: OpenAiConfig,
    prompt_template: String,
    call_log: Option<LlmCallLogger>,
}

impl OpenAiSummarizer {
    pub fn new(config: OpenAiConfig, call_log: Option<LlmCallLogger>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let prompt_template = load_prompt(&config.prompts_dir);

        Ok(Self {
            client,
            config,
            prompt_template,
            call_log,
        })
    }

    fn render_prompt(&self, transcript: &str) -> String {
        self.prompt_template.replace("{transcript}", transcript)
    }

    async fn complete(&self, prompt: &str) -> Result<String, EngineError> {
        if self.config.api_key.is_empty() {
            return Err(EngineError::Unavailable(
                "OPENAI_API_KEY is not configured".to_string(),
            ));
        }

        let request = ChatRequest {
            model: &self.config.model,
            temperature: 0.0,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: json!({"type": "json_object"}),
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout(self.config.request_timeout)
                } else {
                    EngineError::Unavailable(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Unavailable(format!("HTTP {} - {}", status, body)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::MalformedOutput(format!("unexpected response body: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| EngineError::MalformedOutput("response had no content".to_string()))
    }
}

#[async_trait]
impl SummarizationEngine for OpenAiSummarizer {
    async fn summarize(&self, event_id: Uuid, transcript: &str) -> Result<Summary, EngineError> {
        let prompt = self.render_prompt(transcript);
        info!("Requesting summary for event {} from {}", event_id, self.config.model);

        let content = self.complete(&prompt).await?;

        if let Some(call_log) = &self.call_log {
            let metadata = json!({"operation": "summarize_meeting", "event_id": event_id});
            if let Err(e) = call_log
                .log_call(&prompt, &content, &self.config.model, &metadata)
                .await
            {
                warn!("Failed to write LLM call log: {}", e);
            }
        }

        parse_summary(&content)
    }
}

fn load_prompt(prompts_dir: &Path) -> String {
    let path = prompts_dir.join(PROMPT_FILE);
    match std::fs::read_to_string(&path) {
        Ok(template) => {
            debug!("Loaded summary prompt from {}", path.display());
            template
        }
        Err(_) => {
            debug!("No prompt at {}, using built-in template", path.display());
            DEFAULT_PROMPT.to_string()
        }
    }
}

/// Removes a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses a model reply into a summary.
pub fn parse_summary(content: &str) -> Result<Summary, EngineError> {
    let raw: RawSummary = serde_json::from_str(strip_code_fence(content))
        .map_err(|e| EngineError::MalformedOutput(format!("invalid summary JSON: {}", e)))?;

    let sentiment: Sentiment = raw.sentiment.parse().map_err(EngineError::MalformedOutput)?;

    Ok(Summary {
        tldr: raw.tldr,
        action_items: raw.action_items,
        sentiment,
        sentiment_explanation: raw.sentiment_explanation,
    })
}
