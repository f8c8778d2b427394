//! API client: one function per backend capability.
//!
//! Every call issues exactly one request. There is no retry, no backoff and no
//! timeout beyond reqwest's defaults; a non-2xx status becomes `ClientError::Api`
//! carrying the backend's `detail` when it sent one.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub mod types;

pub use types::{
    CategoryList, EvaluateAnswerRequest, FileUpload, GenerateAnswerRequest, GeneratedAnswer,
    HealthStatus, QuestionList, QuestionQuery, StatusMessage,
};

use crate::errors::{extract_detail, ClientError};
use crate::models::{
    EvaluationResponse, JobDescriptionResponse, ProgressResponse, Question, TermExplanation,
};
use types::{AnalyzeTextRequest, AnalyzeUrlRequest};

/// The backend contract. Pages take `&dyn InterviewApi` so tests can swap in a fake.
#[async_trait]
pub trait InterviewApi: Send + Sync {
    async fn analyze_job_description(&self, text: &str)
        -> Result<JobDescriptionResponse, ClientError>;

    async fn analyze_job_description_file(
        &self,
        upload: FileUpload,
    ) -> Result<JobDescriptionResponse, ClientError>;

    async fn analyze_job_description_url(
        &self,
        url: &str,
    ) -> Result<JobDescriptionResponse, ClientError>;

    async fn get_questions(&self, query: &QuestionQuery) -> Result<QuestionList, ClientError>;

    async fn get_question(&self, id: &str) -> Result<Question, ClientError>;

    async fn get_categories(&self) -> Result<CategoryList, ClientError>;

    async fn generate_answer(
        &self,
        request: &GenerateAnswerRequest,
    ) -> Result<GeneratedAnswer, ClientError>;

    async fn evaluate_answer(
        &self,
        request: &EvaluateAnswerRequest,
    ) -> Result<EvaluationResponse, ClientError>;

    async fn get_progress(&self) -> Result<ProgressResponse, ClientError>;

    async fn reset_progress(&self) -> Result<StatusMessage, ClientError>;

    async fn explain_term(
        &self,
        term: &str,
        context: Option<&str>,
    ) -> Result<TermExplanation, ClientError>;

    async fn health(&self) -> Result<HealthStatus, ClientError>;
}

/// reqwest-backed implementation talking to the interview backend over HTTP.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turns a response into `T`, or into `ClientError::Api` for non-success statuses.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = extract_detail(&body);
        let logged = detail.as_deref().unwrap_or_else(|| body_preview(&body));
        warn!("{url} returned {status}: {logged}");
        return Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    debug!("{url} returned {status} ({} bytes)", body.len());
    Ok(serde_json::from_str(&body)?)
}

/// Error bodies without a `detail` can be whole HTML pages; only the head is logged.
const LOGGED_BODY_CHARS: usize = 200;

fn body_preview(body: &str) -> &str {
    match body.char_indices().nth(LOGGED_BODY_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

#[async_trait]
impl InterviewApi for ApiClient {
    async fn analyze_job_description(
        &self,
        text: &str,
    ) -> Result<JobDescriptionResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/analyze-jd"))
            .json(&AnalyzeTextRequest {
                job_description: text,
            })
            .send()
            .await?;
        decode(response).await
    }

    async fn analyze_job_description_file(
        &self,
        upload: FileUpload,
    ) -> Result<JobDescriptionResponse, ClientError> {
        let mime = upload.mime_type();
        let part = multipart::Part::bytes(upload.content.to_vec())
            .file_name(upload.file_name)
            .mime_str(mime)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/analyze-jd-file"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn analyze_job_description_url(
        &self,
        url: &str,
    ) -> Result<JobDescriptionResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/analyze-jd-url"))
            .json(&AnalyzeUrlRequest { url })
            .send()
            .await?;
        decode(response).await
    }

    async fn get_questions(&self, query: &QuestionQuery) -> Result<QuestionList, ClientError> {
        let response = self
            .client
            .get(self.url("/api/questions"))
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_question(&self, id: &str) -> Result<Question, ClientError> {
        let mut url = reqwest::Url::parse(&self.url("/api/questions"))
            .map_err(|e| ClientError::Validation(format!("Invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("Base URL cannot carry a path".into()))?
            .push(id);

        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn get_categories(&self) -> Result<CategoryList, ClientError> {
        let response = self.client.get(self.url("/api/categories")).send().await?;
        decode(response).await
    }

    async fn generate_answer(
        &self,
        request: &GenerateAnswerRequest,
    ) -> Result<GeneratedAnswer, ClientError> {
        let response = self
            .client
            .post(self.url("/api/generate-answer"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn evaluate_answer(
        &self,
        request: &EvaluateAnswerRequest,
    ) -> Result<EvaluationResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/evaluate-answer"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_progress(&self) -> Result<ProgressResponse, ClientError> {
        let response = self.client.get(self.url("/api/progress")).send().await?;
        decode(response).await
    }

    async fn reset_progress(&self) -> Result<StatusMessage, ClientError> {
        let response = self.client.delete(self.url("/api/progress")).send().await?;
        decode(response).await
    }

    async fn explain_term(
        &self,
        term: &str,
        context: Option<&str>,
    ) -> Result<TermExplanation, ClientError> {
        let mut params = vec![("term", term)];
        if let Some(context) = context {
            params.push(("context", context));
        }

        let response = self
            .client
            .post(self.url("/api/explain-term"))
            .query(&params)
            .send()
            .await?;
        decode(response).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        decode(response).await
    }
}
