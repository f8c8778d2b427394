//! Request and envelope types for the interview backend's REST surface.

use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::models::answer::model_answer_from_wire;
use crate::models::{ModelAnswer, Question};

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeTextRequest<'a> {
    pub job_description: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeUrlRequest<'a> {
    pub url: &'a str,
}

/// Filters for `GET /api/questions`. Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl QuestionQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Sets the category; an empty string means "all categories".
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category.filter(|c| !c.is_empty()).map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateAnswerRequest {
    pub question: String,
    pub category: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_context: Option<String>,
    pub hints: Vec<String>,
}

impl GenerateAnswerRequest {
    pub fn for_question(question: &Question, job_context: Option<String>) -> Self {
        Self {
            question: question.question.clone(),
            category: question.category.clone(),
            difficulty: question.difficulty.clone(),
            job_context,
            hints: question.hints.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateAnswerRequest {
    pub question: String,
    pub user_answer: String,
    pub category: String,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_answer: Option<String>,
}

impl EvaluateAnswerRequest {
    pub fn for_question(
        question: &Question,
        user_answer: &str,
        model_answer: Option<&ModelAnswer>,
    ) -> Self {
        Self {
            question: question.question.clone(),
            user_answer: user_answer.to_string(),
            category: question.category.clone(),
            difficulty: question.difficulty.clone(),
            model_answer: model_answer
                .map(|m| m.detailed_answer.clone())
                .filter(|text| !text.is_empty()),
        }
    }
}

/// A job-posting or resume document, forwarded to the backend byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, content))
    }

    /// Lower-cased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("doc") => "application/msword",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response envelopes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedAnswer {
    #[serde(deserialize_with = "model_answer_from_wire")]
    pub answer: ModelAnswer,
    /// True when the backend used the STAR layout for a behavioral question.
    #[serde(default)]
    pub formatted: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: "5".into(),
            question: "Tell me about a time you disagreed with a teammate".into(),
            category: "Behavioral".into(),
            difficulty: "Medium".into(),
            hints: vec!["STAR".into()],
        }
    }

    #[test]
    fn test_generate_request_omits_missing_job_context() {
        let req = GenerateAnswerRequest::for_question(&question(), None);
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("job_context").is_none());
        assert_eq!(value["hints"][0], "STAR");
    }

    #[test]
    fn test_evaluate_request_uses_detailed_answer() {
        let model = ModelAnswer {
            summary: "Stay calm".into(),
            key_points: vec![],
            detailed_answer: "Situation: ...".into(),
            examples: vec![],
        };
        let req = EvaluateAnswerRequest::for_question(&question(), "I listened first", Some(&model));
        assert_eq!(req.model_answer.as_deref(), Some("Situation: ..."));

        let req = EvaluateAnswerRequest::for_question(&question(), "I listened first", None);
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("model_answer").is_none());
    }

    #[test]
    fn test_question_query_blank_category_is_unset() {
        let q = QuestionQuery::with_limit(150).category(Some(""));
        assert_eq!(q.category, None);
        let q = QuestionQuery::with_limit(150).category(Some("NLP"));
        assert_eq!(q.category.as_deref(), Some("NLP"));
    }

    #[test]
    fn test_upload_mime_from_extension() {
        assert_eq!(FileUpload::new("JD.PDF", vec![1u8]).mime_type(), "application/pdf");
        assert_eq!(FileUpload::new("role.txt", vec![1u8]).mime_type(), "text/plain");
        assert_eq!(
            FileUpload::new("blob", vec![1u8]).mime_type(),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_upload_from_path_keeps_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posting.txt");
        std::fs::write(&path, b"Senior Rust Engineer").unwrap();

        let upload = FileUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "posting.txt");
        assert_eq!(&upload.content[..], b"Senior Rust Engineer");
    }
}
