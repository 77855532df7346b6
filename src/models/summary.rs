use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-valued tone classification of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Green,
    Amber,
    Red,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Green => "green",
            Sentiment::Amber => "amber",
            Sentiment::Red => "red",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Sentiment::Green),
            "amber" => Ok(Sentiment::Amber),
            "red" => Ok(Sentiment::Red),
            other => Err(format!("unknown sentiment '{}'", other)),
        }
    }
}

/// Structured insight generated for one event's transcript.
///
/// At most one summary exists per event; regenerating replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub tldr: String,

    #[serde(default)]
    pub action_items: Vec<String>,

    pub sentiment: Sentiment,

    pub sentiment_explanation: String,
}

impl Summary {
    pub fn new(
        tldr: impl Into<String>,
        action_items: Vec<String>,
        sentiment: Sentiment,
        sentiment_explanation: impl Into<String>,
    ) -> Self {
        Self {
            tldr: tldr.into(),
            action_items,
            sentiment,
            sentiment_explanation: sentiment_explanation.into(),
        }
    }
}
