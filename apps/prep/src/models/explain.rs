use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// Response of the term-explanation endpoint.
///
/// The backend has served two unrelated shapes for the same route. Both are
/// decoded as-is; callers match on the variant instead of assuming one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermExplanation {
    Structured {
        definition: String,
        analogy: String,
        #[serde(default, deserialize_with = "null_as_default")]
        key_points: Vec<String>,
        example: String,
        why_it_matters: String,
    },
    Flat {
        term: String,
        explanation: String,
        #[serde(default, deserialize_with = "null_as_default")]
        examples: Vec<String>,
    },
}

impl TermExplanation {
    pub fn is_structured(&self) -> bool {
        matches!(self, TermExplanation::Structured { .. })
    }
}
