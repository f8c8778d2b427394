use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::models::null_as_default;

/// Per-category aggregate as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub count: u32,
    pub average_score: f64,
}

/// One practice record in the backend's own history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPracticeEntry {
    pub question_id: String,
    pub question: String,
    pub category: String,
    pub score: f64,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// RFC 3339 timestamps, or naive ISO timestamps (no offset) read as UTC.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| D::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_questions_practiced: u32,
    pub average_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_breakdown: BTreeMap<String, CategoryBreakdown>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_practices: Vec<ServerPracticeEntry>,
}

/// Server-aggregated progress. Shown next to, never merged with, local statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub stats: ProgressStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvement_suggestions: Vec<String>,
}
