use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Client-level error type.
/// Every API client function and page action returns `Result<T, ClientError>`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A request is already in flight")]
    Busy,

    #[error("No question is currently selected")]
    NoActiveQuestion,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}){}", detail_suffix(.detail))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Backend-supplied `detail`, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when the failure was raised before any request left the process.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::Busy | ClientError::NoActiveQuestion
        )
    }

    /// Message to show the user: validation text or backend detail when present,
    /// otherwise the page's static fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            _ => self
                .detail()
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Pulls a human-readable `detail` out of an error body.
/// Handles plain strings and FastAPI's validation list (`[{"msg": ...}, ...]`).
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Value::String(s) => Some(s),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
