//! Question browser with a category filter, client-side search and incremental paging.

use tracing::{debug, info};

use crate::api_client::{InterviewApi, QuestionQuery};
use crate::errors::ClientError;
use crate::models::Question;
use crate::pages::{report_failure, while_loading};
use crate::store::AppStore;

/// Questions revealed initially and per `load_more`.
pub const PAGE_SIZE: usize = 20;
/// How many questions the browser asks the backend for.
pub const QUESTION_LIMIT: u32 = 150;

pub const LOAD_QUESTIONS_FAILED: &str =
    "Failed to load questions. Please check if backend is running.";
pub const LOAD_CATEGORIES_FAILED: &str = "Failed to load categories";
pub const NO_QUESTIONS_MESSAGE: &str = "No questions loaded from API";

#[derive(Debug)]
pub struct QuestionListPage {
    questions: Vec<Question>,
    categories: Vec<String>,
    selected_category: Option<String>,
    search_term: String,
    display_count: usize,
    pub error: Option<String>,
}

impl Default for QuestionListPage {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            categories: Vec::new(),
            selected_category: None,
            search_term: String::new(),
            display_count: PAGE_SIZE,
            error: None,
        }
    }
}

impl QuestionListPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Mount-time fetch of both categories and the unfiltered question list.
    /// The two loads are independent; a failed one does not skip the other.
    /// The first failure is returned.
    pub async fn mount(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<(), ClientError> {
        let categories = self.load_categories(api, store).await;
        let categories_error = self.error.take();
        let questions = self.load_questions(api, store).await;
        if self.error.is_none() {
            self.error = categories_error;
        }
        categories.and(questions)
    }

    pub async fn load_categories(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<(), ClientError> {
        match while_loading(store, api.get_categories()).await {
            Ok(list) => {
                debug!("Loaded {} categories", list.categories.len());
                self.categories = list.categories;
                Ok(())
            }
            Err(e) => {
                self.error = Some(report_failure("load categories", &e, LOAD_CATEGORIES_FAILED));
                Err(e)
            }
        }
    }

    /// Reloads questions for the selected category.
    pub async fn load_questions(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<(), ClientError> {
        self.error = None;
        let query =
            QuestionQuery::with_limit(QUESTION_LIMIT).category(self.selected_category.as_deref());

        match while_loading(store, api.get_questions(&query)).await {
            Ok(list) => {
                info!(
                    "Loaded {} questions (category: {})",
                    list.questions.len(),
                    self.selected_category.as_deref().unwrap_or("all")
                );
                if list.questions.is_empty() {
                    self.error = Some(NO_QUESTIONS_MESSAGE.to_string());
                }
                self.questions = list.questions;
                Ok(())
            }
            Err(e) => {
                self.error = Some(report_failure("load questions", &e, LOAD_QUESTIONS_FAILED));
                Err(e)
            }
        }
    }

    /// Switches category and reloads from the first page. `None` or `""` means all.
    pub async fn select_category(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
        category: Option<&str>,
    ) -> Result<(), ClientError> {
        self.selected_category = category.filter(|c| !c.is_empty()).map(str::to_string);
        self.display_count = PAGE_SIZE;
        self.load_questions(api, store).await
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Loaded questions matching the search term.
    pub fn filtered(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.matches_search(&self.search_term))
            .collect()
    }

    /// The visible slice of `filtered()`.
    pub fn displayed(&self) -> Vec<&Question> {
        let mut filtered = self.filtered();
        filtered.truncate(self.display_count);
        filtered
    }

    pub fn has_more(&self) -> bool {
        self.displayed().len() < self.filtered().len()
    }

    pub fn load_more(&mut self) {
        self.display_count += PAGE_SIZE;
    }

    /// Starts practicing `question`, dropping whatever attempt was in progress.
    pub fn open_question(&self, store: &mut AppStore, question: &Question) {
        store.reset_question();
        store.set_current_question(Some(question.clone()));
    }
}
