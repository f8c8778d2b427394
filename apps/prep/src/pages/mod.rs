//! Page controllers. Each user action validates its input, calls one API
//! function, writes the store, and leaves a message in `error` on failure.
//! A failed call never touches the store's previous contents.

pub mod explainer;
pub mod job_analysis;
pub mod practice;
pub mod progress;
pub mod question_list;

pub use explainer::ExplainerPage;
pub use job_analysis::JobAnalysisPage;
pub use practice::PracticePage;
pub use progress::ProgressPage;
pub use question_list::QuestionListPage;

use std::future::Future;

use tracing::{error, warn};

use crate::errors::ClientError;
use crate::store::AppStore;

/// Lowers the loading flag when dropped, including when the request is abandoned mid-flight.
struct LoadingGuard<'a>(&'a mut AppStore);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set_is_loading(false);
    }
}

/// Runs `request` with the store's loading flag raised.
/// A second action while one is in flight is refused, like a disabled button.
pub(crate) async fn while_loading<T>(
    store: &mut AppStore,
    request: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    if store.is_loading() {
        return Err(ClientError::Busy);
    }
    store.set_is_loading(true);
    let _loading = LoadingGuard(store);
    request.await
}

/// Logs a failed action and returns the message to show.
pub(crate) fn report_failure(action: &str, err: &ClientError, fallback: &str) -> String {
    if err.is_client_side() {
        warn!("{action} rejected: {err}");
    } else {
        error!("Failed to {action}: {err}");
    }
    err.user_message(fallback)
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory `InterviewApi` that counts calls and can be told to fail.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api_client::{
        CategoryList, EvaluateAnswerRequest, FileUpload, GenerateAnswerRequest, GeneratedAnswer,
        HealthStatus, InterviewApi, QuestionList, QuestionQuery, StatusMessage,
    };
    use crate::errors::ClientError;
    use crate::models::{
        EvaluationResponse, JobDescriptionResponse, ModelAnswer, ProgressResponse, ProgressStats,
        Question, TermExplanation,
    };
    use crate::store::tests::{evaluation, job_analysis, question};

    pub struct FakeApi {
        pub calls: AtomicUsize,
        pub fail_with: Option<Option<String>>,
        /// Fails only `get_categories`.
        pub categories_fail: bool,
        pub questions: Vec<Question>,
        pub score: f64,
        pub last_query: Mutex<Option<QuestionQuery>>,
        pub last_generate: Mutex<Option<GenerateAnswerRequest>>,
        pub last_evaluate: Mutex<Option<EvaluateAnswerRequest>>,
        pub last_upload: Mutex<Option<FileUpload>>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
                categories_fail: false,
                questions: (0..45)
                    .map(|i| {
                        let category = if i % 3 == 0 { "Python" } else { "System Design" };
                        question(&i.to_string(), category)
                    })
                    .collect(),
                score: 7.0,
                last_query: Mutex::new(None),
                last_generate: Mutex::new(None),
                last_evaluate: Mutex::new(None),
                last_upload: Mutex::new(None),
            }
        }

        /// Every call fails with a 500, optionally carrying `detail`.
        pub fn failing(detail: Option<&str>) -> Self {
            Self {
                fail_with: Some(detail.map(str::to_string)),
                ..Self::new()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(detail) => Err(ClientError::Api {
                    status: 500,
                    detail: detail.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl InterviewApi for FakeApi {
        async fn analyze_job_description(
            &self,
            _text: &str,
        ) -> Result<JobDescriptionResponse, ClientError> {
            self.hit()?;
            Ok(job_analysis())
        }

        async fn analyze_job_description_file(
            &self,
            upload: FileUpload,
        ) -> Result<JobDescriptionResponse, ClientError> {
            self.hit()?;
            *self.last_upload.lock().unwrap() = Some(upload);
            Ok(job_analysis())
        }

        async fn analyze_job_description_url(
            &self,
            _url: &str,
        ) -> Result<JobDescriptionResponse, ClientError> {
            self.hit()?;
            Ok(job_analysis())
        }

        async fn get_questions(&self, query: &QuestionQuery) -> Result<QuestionList, ClientError> {
            self.hit()?;
            *self.last_query.lock().unwrap() = Some(query.clone());
            let questions: Vec<Question> = self
                .questions
                .iter()
                .filter(|q| query.category.as_ref().map_or(true, |c| &q.category == c))
                .take(query.limit.unwrap_or(10) as usize)
                .cloned()
                .collect();
            Ok(QuestionList {
                total: questions.len() as u32,
                questions,
            })
        }

        async fn get_question(&self, id: &str) -> Result<Question, ClientError> {
            self.hit()?;
            self.questions
                .iter()
                .find(|q| q.id == id)
                .cloned()
                .ok_or(ClientError::Api {
                    status: 404,
                    detail: Some("Question not found".into()),
                })
        }

        async fn get_categories(&self) -> Result<CategoryList, ClientError> {
            self.hit()?;
            if self.categories_fail {
                return Err(ClientError::Api {
                    status: 500,
                    detail: None,
                });
            }
            Ok(CategoryList {
                categories: vec!["Python".into(), "System Design".into()],
            })
        }

        async fn generate_answer(
            &self,
            request: &GenerateAnswerRequest,
        ) -> Result<GeneratedAnswer, ClientError> {
            self.hit()?;
            *self.last_generate.lock().unwrap() = Some(request.clone());
            Ok(GeneratedAnswer {
                answer: ModelAnswer {
                    summary: "Short version".into(),
                    key_points: vec!["point".into()],
                    detailed_answer: format!("Model answer to {}", request.question),
                    examples: vec![],
                },
                formatted: false,
            })
        }

        async fn evaluate_answer(
            &self,
            request: &EvaluateAnswerRequest,
        ) -> Result<EvaluationResponse, ClientError> {
            self.hit()?;
            *self.last_evaluate.lock().unwrap() = Some(request.clone());
            Ok(evaluation(self.score))
        }

        async fn get_progress(&self) -> Result<ProgressResponse, ClientError> {
            self.hit()?;
            Ok(ProgressResponse {
                stats: ProgressStats {
                    total_questions_practiced: 3,
                    average_score: 6.4,
                    category_breakdown: Default::default(),
                    recent_practices: vec![],
                },
                improvement_suggestions: vec!["Practice more questions in: NLP".into()],
            })
        }

        async fn reset_progress(&self) -> Result<StatusMessage, ClientError> {
            self.hit()?;
            Ok(StatusMessage {
                message: "Progress data reset successfully".into(),
            })
        }

        async fn explain_term(
            &self,
            term: &str,
            _context: Option<&str>,
        ) -> Result<TermExplanation, ClientError> {
            self.hit()?;
            Ok(TermExplanation::Flat {
                term: term.to_string(),
                explanation: format!("{term} explained"),
                examples: vec![],
            })
        }

        async fn health(&self) -> Result<HealthStatus, ClientError> {
            self.hit()?;
            Ok(HealthStatus {
                status: "healthy".into(),
            })
        }
    }
}
