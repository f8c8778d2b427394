//! Progress dashboard. Local history is authoritative; the backend aggregate is
//! fetched on request and kept in its own panel.

use crate::api_client::{InterviewApi, StatusMessage};
use crate::errors::ClientError;
use crate::models::ProgressResponse;
use crate::pages::{report_failure, while_loading};
use crate::progress::{summarize, ProgressSummary};
use crate::store::AppStore;

pub const LOAD_PROGRESS_FAILED: &str = "Failed to load progress. Please try again.";
pub const RESET_PROGRESS_FAILED: &str = "Failed to reset progress. Please try again.";

#[derive(Debug, Default)]
pub struct ProgressPage {
    pub server: Option<ProgressResponse>,
    pub error: Option<String>,
}

impl ProgressPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self, store: &AppStore) -> ProgressSummary {
        summarize(store.practice_history())
    }

    pub async fn load_server_progress(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<(), ClientError> {
        self.error = None;
        match while_loading(store, api.get_progress()).await {
            Ok(progress) => {
                self.server = Some(progress);
                Ok(())
            }
            Err(e) => {
                self.error = Some(report_failure("load progress", &e, LOAD_PROGRESS_FAILED));
                Err(e)
            }
        }
    }

    /// Clears the backend's history. The local session history is not touched.
    pub async fn reset_server_progress(
        &mut self,
        api: &dyn InterviewApi,
        store: &mut AppStore,
    ) -> Result<StatusMessage, ClientError> {
        self.error = None;
        match while_loading(store, api.reset_progress()).await {
            Ok(message) => {
                self.server = None;
                Ok(message)
            }
            Err(e) => {
                self.error = Some(report_failure("reset progress", &e, RESET_PROGRESS_FAILED));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PracticeEntry;
    use crate::pages::fake::FakeApi;
    use crate::progress::Trend;
    use crate::store::tests::{evaluation, question};

    #[test]
    fn test_summary_reads_store_history() {
        let mut store = AppStore::new();
        for score in [6.0, 8.0, 10.0] {
            store.add_practice_entry(PracticeEntry::new(
                question("1", "Python"),
                "answer".into(),
                None,
                Some(evaluation(score)),
            ));
        }
        let summary = ProgressPage::new().summary(&store);
        assert_eq!(summary.total_practiced, 3);
        assert_eq!(summary.average_score, Some(8.0));
        assert_eq!(summary.trend, Trend::Improving);
    }

    #[tokio::test]
    async fn test_server_progress_kept_separate() {
        let api = FakeApi::new();
        let mut store = AppStore::new();
        let mut page = ProgressPage::new();

        page.load_server_progress(&api, &mut store).await.unwrap();
        assert_eq!(page.server.as_ref().unwrap().stats.total_questions_practiced, 3);
        assert_eq!(page.summary(&store).total_practiced, 0);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_panel() {
        let mut store = AppStore::new();
        let mut page = ProgressPage::new();
        page.load_server_progress(&FakeApi::new(), &mut store)
            .await
            .unwrap();

        let result = page
            .load_server_progress(&FakeApi::failing(None), &mut store)
            .await;
        assert!(result.is_err());
        assert_eq!(page.error.as_deref(), Some(LOAD_PROGRESS_FAILED));
        assert!(page.server.is_some());
    }

    #[tokio::test]
    async fn test_reset_clears_server_panel_only() {
        let api = FakeApi::new();
        let mut store = AppStore::new();
        store.add_practice_entry(PracticeEntry::new(
            question("1", "NLP"),
            "answer".into(),
            None,
            Some(evaluation(5.0)),
        ));
        let mut page = ProgressPage::new();
        page.load_server_progress(&api, &mut store).await.unwrap();

        let message = page.reset_server_progress(&api, &mut store).await.unwrap();
        assert_eq!(message.message, "Progress data reset successfully");
        assert!(page.server.is_none());
        assert_eq!(store.practice_history().len(), 1);
    }
}
