use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// A practice question as served by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Prompt text.
    pub question: String,
    pub category: String,
    pub difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hints: Vec<String>,
}

impl Question {
    /// Case-insensitive match on prompt text or category.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.question.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}
