use serde::{Deserialize, Deserializer, Serialize};

use crate::models::null_as_default;

/// Backend-generated reference answer to a practice question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelAnswer {
    #[serde(default)]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
    pub detailed_answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<String>,
}

impl ModelAnswer {
    /// Wraps a bare answer string with no summary or key points.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            detailed_answer: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelAnswerWire {
    Structured(ModelAnswer),
    Plain(String),
}

/// Accepts either the structured answer object or a bare string.
pub(crate) fn model_answer_from_wire<'de, D>(deserializer: D) -> Result<ModelAnswer, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ModelAnswerWire::deserialize(deserializer)? {
        ModelAnswerWire::Structured(answer) => answer,
        ModelAnswerWire::Plain(text) => ModelAnswer::from_text(text),
    })
}

/// Five sub-scores, each conventionally on a 0–10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerScores {
    pub overall: f64,
    pub clarity: f64,
    pub completeness: f64,
    pub accuracy: f64,
    pub professionalism: f64,
}

impl AnswerScores {
    /// Sub-scores in display order, labelled.
    pub fn breakdown(&self) -> [(&'static str, f64); 4] {
        [
            ("clarity", self.clarity),
            ("completeness", self.completeness),
            ("accuracy", self.accuracy),
            ("professionalism", self.professionalism),
        ]
    }
}

/// Scores and qualitative feedback for one (question, user answer) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub scores: AnswerScores,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub follow_up_questions: Vec<String>,
    #[serde(default)]
    pub feedback: String,
}
