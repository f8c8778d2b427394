//! Term explainer. Owns its own small store rather than the shared one.

use crate::api_client::InterviewApi;
use crate::errors::ClientError;
use crate::pages::report_failure;
use crate::store::ExplainerState;

/// Longest term the backend accepts.
pub const MAX_TERM_CHARS: usize = 100;

pub const EXPLAIN_FAILED: &str = "Failed to get explanation. Please try again.";

#[derive(Debug, Default)]
pub struct ExplainerPage {
    pub state: ExplainerState,
}

impl ExplainerPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.state.set_term(term);
    }

    /// Explains the current term. Blank input is ignored without a request.
    pub async fn explain(
        &mut self,
        api: &dyn InterviewApi,
        context: Option<&str>,
    ) -> Result<(), ClientError> {
        if self.state.is_loading {
            return Err(ClientError::Busy);
        }
        self.state.set_error(None);

        let term = self.state.term.trim().to_string();
        if term.is_empty() {
            return Err(ClientError::Validation("Enter a term to explain".to_string()));
        }
        if term.chars().count() > MAX_TERM_CHARS {
            let e = ClientError::Validation(format!(
                "Terms are limited to {MAX_TERM_CHARS} characters"
            ));
            self.state.set_error(Some(report_failure("explain term", &e, EXPLAIN_FAILED)));
            return Err(e);
        }

        self.state.set_is_loading(true);
        let result = api.explain_term(&term, context).await;
        self.state.set_is_loading(false);

        match result {
            Ok(explanation) => {
                self.state.set_result(Some(explanation));
                Ok(())
            }
            Err(e) => {
                self.state
                    .set_error(Some(report_failure("explain term", &e, EXPLAIN_FAILED)));
                Err(e)
            }
        }
    }
}
