use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meeting,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Meeting => "meeting",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(EventType::Meeting),
            other => Err(format!("unknown event type '{}'", other)),
        }
    }
}

/// Caller-supplied point in time, kept exactly as written.
///
/// The parsed wall-clock value is only used for ordering; an offset, if the
/// caller included one, is never applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTimestamp {
    raw: String,
    wall_clock: NaiveDateTime,
}

impl EventTimestamp {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("timestamp is required".to_string());
        }

        // A trailing `Z` is read as `+00:00` so the offset formats cover it.
        let with_offset = match trimmed.strip_suffix(['Z', 'z']) {
            Some(rest) => format!("{}+00:00", rest),
            None => trimmed.to_string(),
        };

        let wall_clock = DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.naive_local())
            .ok()
            .or_else(|| {
                OFFSET_FORMATS
                    .iter()
                    .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
                    .map(|dt| dt.naive_local())
            })
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            })
            .ok_or_else(|| format!("timestamp '{}' is not a valid ISO-8601 date-time", raw))?;

        Ok(Self {
            raw: raw.to_string(),
            wall_clock,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn wall_clock(&self) -> NaiveDateTime {
        self.wall_clock
    }
}

impl fmt::Display for EventTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for EventTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for EventTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        EventTimestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub customer_id: Uuid,

    pub event_type: EventType,

    pub timestamp: EventTimestamp,

    pub location: Option<String>,

    pub transcript: Option<String>,

    /// Derived once from the transcript at creation, never recomputed.
    pub participants: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Event {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::types::Json;
        use sqlx::Row;

        let raw_timestamp: String = row.try_get("timestamp")?;
        let timestamp =
            EventTimestamp::parse(&raw_timestamp).map_err(|e| sqlx::Error::ColumnDecode {
                index: "timestamp".to_string(),
                source: e.into(),
            })?;
        let raw_type: String = row.try_get("event_type")?;
        let event_type = raw_type.parse().map_err(|e: String| sqlx::Error::ColumnDecode {
            index: "event_type".to_string(),
            source: e.into(),
        })?;
        let participants: Option<Json<Vec<String>>> = row.try_get("participants")?;

        Ok(Self {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            event_type,
            timestamp,
            location: row.try_get("location")?,
            transcript: row.try_get("transcript")?,
            participants: participants.map(|Json(names)| names),
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMeeting {
    pub customer_id: Uuid,

    pub timestamp: Option<String>,

    pub location: Option<String>,

    pub transcript: Option<String>,
}

impl Event {
    pub fn new(
        customer_id: Uuid,
        event_type: EventType,
        timestamp: EventTimestamp,
        location: Option<String>,
        transcript: Option<String>,
        participants: Option<Vec<String>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            event_type,
            timestamp,
            location,
            transcript,
            participants,
            created_at: Utc::now(),
        }
    }

    /// The transcript, if it holds anything besides whitespace.
    pub fn summarizable_transcript(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Timeline order: wall-clock timestamp ascending, then id.
pub fn sort_timeline(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.timestamp
            .wall_clock()
            .cmp(&b.timestamp.wall_clock())
            .then_with(|| a.id.cmp(&b.id))
    });
}
