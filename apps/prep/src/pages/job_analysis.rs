//! Job description analysis: paste text, upload a document, or point at a URL.

use tracing::info;

use crate::api_client::{FileUpload, InterviewApi};
use crate::errors::ClientError;
use crate::models::{JobDescriptionResponse, Question};
use crate::pages::{report_failure, while_loading};
use crate::store::AppStore;

/// Shortest job description the backend will accept.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
/// Document types the backend can extract text from.
pub const SUPPORTED_UPLOAD_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

pub const TOO_SHORT_MESSAGE: &str = "Please enter a job description (at least 50 characters)";
pub const ANALYZE_FAILED_MESSAGE: &str = "Failed to analyze job description. Please try again.";

#[derive(Debug, Default)]
pub struct JobAnalysisPage {
    pub error: Option<String>,
}

impl JobAnalysisPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The analysis held in the store, so it survives navigating away and back.
    pub fn analysis<'a>(&self, store: &'a AppStore) -> Option<&'a JobDescriptionResponse> {
        store.current_job_analysis()
    }

    pub fn matched_questions<'a>(&self, store: &'a AppStore) -> &'a [Question] {
        store
            .current_job_analysis()
            .map(|a| a.matched_questions.as_slice())
            .unwrap_or_default()
    }

    pub async fn analyze_text(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
        text: &str,
    ) -> Result<(), ClientError> {
        self.error = None;
        if let Err(e) = validate_text(text) {
            return self.fail(e);
        }

        let result = while_loading(store, api.analyze_job_description(text)).await;
        self.finish(store, result)
    }

    pub async fn analyze_file(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
        upload: FileUpload,
    ) -> Result<(), ClientError> {
        self.error = None;
        if let Err(e) = validate_upload(&upload) {
            return self.fail(e);
        }

        info!(
            "Uploading {} ({} bytes) for analysis",
            upload.file_name,
            upload.content.len()
        );
        let result = while_loading(store, api.analyze_job_description_file(upload)).await;
        self.finish(store, result)
    }

    pub async fn analyze_url(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
        url: &str,
    ) -> Result<(), ClientError> {
        self.error = None;
        if let Err(e) = validate_url(url) {
            return self.fail(e);
        }

        let result = while_loading(store, api.analyze_job_description_url(url.trim())).await;
        self.finish(store, result)
    }

    fn finish(
        &mut self,
        store: &mut AppStore,
        result: Result<JobDescriptionResponse, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(analysis) => {
                info!(
                    "Analyzed job description: role={}, {} matched questions",
                    analysis.analysis.job_role,
                    analysis.matched_questions.len()
                );
                store.set_job_analysis(Some(analysis));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, e: ClientError) -> Result<(), ClientError> {
        self.error = Some(report_failure(
            "analyze job description",
            &e,
            ANALYZE_FAILED_MESSAGE,
        ));
        Err(e)
    }
}

pub fn validate_text(text: &str) -> Result<(), ClientError> {
    if text.trim().is_empty() || text.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(ClientError::Validation(TOO_SHORT_MESSAGE.to_string()));
    }
    Ok(())
}

pub fn validate_upload(upload: &FileUpload) -> Result<(), ClientError> {
    if upload.content.is_empty() {
        return Err(ClientError::Validation(format!(
            "'{}' is empty",
            upload.file_name
        )));
    }
    match upload.extension() {
        Some(ext) if SUPPORTED_UPLOAD_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ClientError::Validation(format!(
            "Unsupported file type for '{}'. Use PDF, DOC, DOCX or TXT.",
            upload.file_name
        ))),
    }
}

/// Absolute http(s) URL with a host.
pub fn validate_url(url: &str) -> Result<(), ClientError> {
    let invalid =
        || ClientError::Validation(format!("'{}' is not a valid http(s) URL", url.trim()));
    let parsed = reqwest::Url::parse(url.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}
