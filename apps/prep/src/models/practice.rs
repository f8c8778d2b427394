use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{EvaluationResponse, ModelAnswer, Question};

/// One completed practice attempt. Appended to the session history, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeEntry {
    pub id: Uuid,
    pub question: Question,
    pub user_answer: String,
    pub model_answer: Option<ModelAnswer>,
    pub evaluation: Option<EvaluationResponse>,
    pub timestamp: DateTime<Utc>,
}

impl PracticeEntry {
    pub fn new(
        question: Question,
        user_answer: String,
        model_answer: Option<ModelAnswer>,
        evaluation: Option<EvaluationResponse>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            user_answer,
            model_answer,
            evaluation,
            timestamp: Utc::now(),
        }
    }

    /// Overall score, when the entry was evaluated and the score is a real number.
    pub fn overall_score(&self) -> Option<f64> {
        self.evaluation
            .as_ref()
            .map(|e| e.scores.overall)
            .filter(|s| s.is_finite())
    }

    pub fn category(&self) -> &str {
        &self.question.category
    }
}
