use serde::{Deserialize, Serialize};

use crate::models::{null_as_default, Question};

/// Structured requirements the backend extracted from a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_skills: Vec<String>,
    pub experience_level: String,
    pub job_role: String,
}

/// Result of one analyze call: the analysis, a one-line summary and matched questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionResponse {
    pub analysis: JobAnalysis,
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched_questions: Vec<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_description_response_deserializes() {
        let body = r#"{
            "analysis": {
                "required_skills": ["Python", "FastAPI", "PostgreSQL"],
                "preferred_skills": [],
                "experience_level": "Senior",
                "job_role": "Backend Engineer"
            },
            "summary": "Position: Backend Engineer. Level: Senior. Key skills: Python, FastAPI, PostgreSQL",
            "matched_questions": [
                {"id": "12", "question": "How does the GIL affect threading?", "category": "Python", "difficulty": "Medium", "hints": ["CPython"]}
            ]
        }"#;
        let parsed: JobDescriptionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.analysis.job_role, "Backend Engineer");
        assert_eq!(parsed.analysis.required_skills.len(), 3);
        assert_eq!(parsed.matched_questions[0].id, "12");
    }
}
