//! Practice flow: walk a question queue, get a model answer, submit an answer for evaluation.

use tracing::info;

use crate::api_client::{
    EvaluateAnswerRequest, GenerateAnswerRequest, InterviewApi, QuestionQuery,
};
use crate::errors::ClientError;
use crate::models::Question;
use crate::pages::{report_failure, while_loading};
use crate::store::AppStore;

/// Queue size requested when practicing by category.
pub const QUEUE_LIMIT: u32 = 50;

pub const LOAD_QUEUE_FAILED: &str = "Failed to load questions. Please try again.";
pub const GENERATE_FAILED: &str = "Failed to generate answer. Please try again.";
pub const EVALUATE_FAILED: &str = "Failed to evaluate answer. Please try again.";
pub const EMPTY_ANSWER_MESSAGE: &str = "Please write an answer before requesting evaluation";

#[derive(Debug, Default)]
pub struct PracticePage {
    queue: Vec<Question>,
    index: usize,
    /// Whether the last model answer came back in STAR layout.
    pub formatted: bool,
    pub error: Option<String>,
}

impl PracticePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &[Question] {
        &self.queue
    }

    /// 1-based position and queue length, when a queue is loaded.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.queue.is_empty() {
            None
        } else {
            Some((self.index + 1, self.queue.len()))
        }
    }

    /// Fetches a queue for `category` and starts on its first question.
    pub async fn load_queue(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
        category: Option<&str>,
    ) -> Result<usize, ClientError> {
        self.error = None;
        let query = QuestionQuery::with_limit(QUEUE_LIMIT).category(category);
        match while_loading(store, api.get_questions(&query)).await {
            Ok(list) => Ok(self.start_queue(store, list.questions)),
            Err(e) => {
                self.error = Some(report_failure("load questions", &e, LOAD_QUEUE_FAILED));
                Err(e)
            }
        }
    }

    /// Uses the questions matched by the stored job analysis as the queue.
    pub fn use_matched_questions(&mut self, store: &mut AppStore) -> usize {
        let matched = store
            .current_job_analysis()
            .map(|a| a.matched_questions.clone())
            .unwrap_or_default();
        self.start_queue(store, matched)
    }

    fn start_queue(&mut self, store: &mut AppStore, questions: Vec<Question>) -> usize {
        self.queue = questions;
        self.index = 0;
        store.set_current_question(self.queue.first().cloned());
        self.queue.len()
    }

    pub fn next(&mut self, store: &mut AppStore) -> bool {
        if self.index + 1 >= self.queue.len() {
            return false;
        }
        self.index += 1;
        store.set_current_question(self.queue.get(self.index).cloned());
        true
    }

    pub fn previous(&mut self, store: &mut AppStore) -> bool {
        if self.index == 0 || self.queue.is_empty() {
            return false;
        }
        self.index -= 1;
        store.set_current_question(self.queue.get(self.index).cloned());
        true
    }

    pub fn set_answer(&self, store: &mut AppStore, answer: impl Into<String>) {
        store.set_current_answer(answer);
    }

    /// Asks the backend for a reference answer to the current question.
    /// The stored job analysis summary, if any, is sent as context.
    pub async fn generate_answer(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<(), ClientError> {
        self.error = None;
        let Some(question) = store.current_question() else {
            return self.fail(ClientError::NoActiveQuestion, GENERATE_FAILED);
        };
        let job_context = store.current_job_analysis().map(|a| a.summary.clone());
        let request = GenerateAnswerRequest::for_question(question, job_context);

        match while_loading(store, api.generate_answer(&request)).await {
            Ok(generated) => {
                self.formatted = generated.formatted;
                store.set_model_answer(Some(generated.answer));
                Ok(())
            }
            Err(e) => self.fail(e, GENERATE_FAILED),
        }
    }

    /// Submits the current answer, stores the evaluation and appends a practice entry.
    pub async fn evaluate(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<(), ClientError> {
        self.error = None;
        let Some(question) = store.current_question() else {
            return self.fail(ClientError::NoActiveQuestion, EVALUATE_FAILED);
        };
        if store.current_answer().trim().is_empty() {
            return self.fail(
                ClientError::Validation(EMPTY_ANSWER_MESSAGE.to_string()),
                EVALUATE_FAILED,
            );
        }
        let request = EvaluateAnswerRequest::for_question(
            question,
            store.current_answer(),
            store.model_answer(),
        );

        match while_loading(store, api.evaluate_answer(&request)).await {
            Ok(evaluation) => {
                info!(
                    "Evaluated answer for '{}': overall {:.1}",
                    request.question, evaluation.scores.overall
                );
                store.set_evaluation(Some(evaluation));
                store.record_practice();
                Ok(())
            }
            Err(e) => self.fail(e, EVALUATE_FAILED),
        }
    }

    fn fail(&mut self, e: ClientError, fallback: &str) -> Result<(), ClientError> {
        self.error = Some(report_failure("complete practice action", &e, fallback));
        Err(e)
    }
}
