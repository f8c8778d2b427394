//! Records exchanged with the interview backend and mirrored in client state.

pub mod answer;
pub mod explain;
pub mod job;
pub mod practice;
pub mod progress;
pub mod question;

pub use answer::{AnswerScores, EvaluationResponse, ModelAnswer};
pub use explain::TermExplanation;
pub use job::{JobAnalysis, JobDescriptionResponse};
pub use practice::PracticeEntry;
pub use progress::{CategoryBreakdown, ProgressResponse, ProgressStats, ServerPracticeEntry};
pub use question::Question;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
