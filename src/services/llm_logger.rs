use anyhow::Result;
use chrono::{Local, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;

const RULE: &str = "================================================================================";

/// Writes one text file per LLM call: prompt, raw response and metadata.
#[derive(Debug, Clone)]
pub struct LlmCallLogger {
    log_dir: PathBuf,
}

impl LlmCallLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Returns the file name written inside the log directory.
    pub async fn log_call(
        &self,
        prompt: &str,
        response: &str,
        model: &str,
        metadata: &serde_json::Value,
    ) -> Result<String> {
        fs::create_dir_all(&self.log_dir).await?;

        let filename = format!("{}_{}.txt", Local::now().format("%Y%m%d_%H%M%S_%6f"), model);
        let mut content = format!(
            "{RULE}\nLLM CALL LOG\n{RULE}\nTimestamp: {}\nModel: {}\n",
            Utc::now().to_rfc3339(),
            model
        );

        if metadata.as_object().is_some_and(|m| !m.is_empty()) {
            content.push_str(&format!(
                "\nMetadata:\n{}\n",
                serde_json::to_string_pretty(metadata)?
            ));
        }

        content.push_str(&format!(
            "\n{RULE}\nPROMPT\n{RULE}\n{}\n\n{RULE}\nRESPONSE\n{RULE}\n{}\n\n{RULE}\n",
            prompt, response
        ));

        fs::write(self.log_dir.join(&filename), content).await?;

        Ok(filename)
    }
}
