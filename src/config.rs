use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::engine::orchestrator::DEFAULT_ENGINE_TIMEOUT;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Settings {
    /// `None` selects the in-memory stores.
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    pub host: String,
    pub port: u16,

    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,

    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub summary_timeout: Duration,
    pub prompts_dir: PathBuf,
    pub llm_log_dir: Option<PathBuf>,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        None => Ok(default),
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            database_url: non_empty_var("DATABASE_URL"),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 8000)?,
            cors_origins: parse_origins(&var_or("CORS_ORIGINS", "")),
            openai_api_key: var_or("OPENAI_API_KEY", ""),
            openai_base_url: var_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: var_or("OPENAI_MODEL", "gpt-4o-mini"),
            summary_timeout: Duration::from_secs(parse_var(
                "SUMMARY_TIMEOUT_SECS",
                DEFAULT_ENGINE_TIMEOUT.as_secs(),
            )?),
            prompts_dir: PathBuf::from(var_or("PROMPTS_DIR", "prompts")),
            llm_log_dir: non_empty_var("LLM_LOG_DIR").map(PathBuf::from),
        };

        debug!("Database configured: {}", settings.database_url.is_some());
        debug!("CORS origins: {:?}", settings.cors_origins);

        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
