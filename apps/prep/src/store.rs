//! Session-lifetime client state shared by every page.
//!
//! Nothing here is persisted: dropping the store loses all of it.

use crate::models::{
    EvaluationResponse, JobDescriptionResponse, ModelAnswer, PracticeEntry, Question,
    TermExplanation,
};

/// Latest job analysis, the active question/answer/evaluation triple, and the
/// append-only practice history.
#[derive(Debug, Default)]
pub struct AppStore {
    current_job_analysis: Option<JobDescriptionResponse>,
    current_question: Option<Question>,
    current_answer: String,
    model_answer: Option<ModelAnswer>,
    evaluation: Option<EvaluationResponse>,
    is_loading: bool,
    practice_history: Vec<PracticeEntry>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Job analysis ────────────────────────────────────────────────────────

    pub fn current_job_analysis(&self) -> Option<&JobDescriptionResponse> {
        self.current_job_analysis.as_ref()
    }

    pub fn set_job_analysis(&mut self, analysis: Option<JobDescriptionResponse>) {
        self.current_job_analysis = analysis;
    }

    // ── Current question triple ─────────────────────────────────────────────

    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    /// Makes `question` the active one. The previous answer, model answer and
    /// evaluation belong to the old question and are cleared.
    pub fn set_current_question(&mut self, question: Option<Question>) {
        self.current_question = question;
        self.clear_attempt();
    }

    pub fn current_answer(&self) -> &str {
        &self.current_answer
    }

    pub fn set_current_answer(&mut self, answer: impl Into<String>) {
        self.current_answer = answer.into();
    }

    pub fn model_answer(&self) -> Option<&ModelAnswer> {
        self.model_answer.as_ref()
    }

    pub fn set_model_answer(&mut self, answer: Option<ModelAnswer>) {
        self.model_answer = answer;
    }

    pub fn evaluation(&self) -> Option<&EvaluationResponse> {
        self.evaluation.as_ref()
    }

    pub fn set_evaluation(&mut self, evaluation: Option<EvaluationResponse>) {
        self.evaluation = evaluation;
    }

    // ── UI state ────────────────────────────────────────────────────────────

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_is_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    // ── Practice history ────────────────────────────────────────────────────

    pub fn practice_history(&self) -> &[PracticeEntry] {
        &self.practice_history
    }

    pub fn add_practice_entry(&mut self, entry: PracticeEntry) {
        self.practice_history.push(entry);
    }

    /// Snapshots the active triple into a new history entry.
    /// Returns `None` when no question is active.
    pub fn record_practice(&mut self) -> Option<&PracticeEntry> {
        let question = self.current_question.clone()?;
        let entry = PracticeEntry::new(
            question,
            self.current_answer.clone(),
            self.model_answer.clone(),
            self.evaluation.clone(),
        );
        self.practice_history.push(entry);
        self.practice_history.last()
    }

    // ── Resets ──────────────────────────────────────────────────────────────

    /// Clears the active question triple. Job analysis and history survive.
    pub fn reset_question(&mut self) {
        self.current_question = None;
        self.clear_attempt();
    }

    /// Clears everything, history included.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    fn clear_attempt(&mut self) {
        self.current_answer.clear();
        self.model_answer = None;
        self.evaluation = None;
    }
}

/// Page-local store for the term explainer.
#[derive(Debug, Default)]
pub struct ExplainerState {
    pub term: String,
    pub result: Option<TermExplanation>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ExplainerState {
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn set_result(&mut self, result: Option<TermExplanation>) {
        self.result = result;
    }

    pub fn set_is_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{AnswerScores, JobAnalysis};

    pub(crate) fn question(id: &str, category: &str) -> Question {
        Question {
            id: id.to_string(),
            question: format!("Question {id}"),
            category: category.to_string(),
            difficulty: "Medium".to_string(),
            hints: vec![],
        }
    }

    pub(crate) fn evaluation(overall: f64) -> EvaluationResponse {
        EvaluationResponse {
            scores: AnswerScores {
                overall,
                clarity: overall,
                completeness: overall,
                accuracy: overall,
                professionalism: overall,
            },
            strengths: vec!["Clear structure".into()],
            improvements: vec![],
            follow_up_questions: vec![],
            feedback: "ok".into(),
        }
    }

    pub(crate) fn job_analysis() -> JobDescriptionResponse {
        JobDescriptionResponse {
            analysis: JobAnalysis {
                required_skills: vec!["Rust".into()],
                preferred_skills: vec![],
                experience_level: "Senior".into(),
                job_role: "Systems Engineer".into(),
            },
            summary: "Position: Systems Engineer. Level: Senior. Key skills: Rust".into(),
            matched_questions: vec![question("1", "Systems"), question("2", "Systems")],
        }
    }

    fn populated() -> AppStore {
        let mut store = AppStore::new();
        store.set_job_analysis(Some(job_analysis()));
        store.set_current_question(Some(question("1", "Python")));
        store.set_current_answer("My answer");
        store.set_model_answer(Some(ModelAnswer::from_text("Model")));
        store.set_evaluation(Some(evaluation(7.0)));
        store.record_practice();
        store.set_is_loading(true);
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = AppStore::new();
        assert!(store.current_job_analysis().is_none());
        assert!(store.current_question().is_none());
        assert_eq!(store.current_answer(), "");
        assert!(!store.is_loading());
        assert!(store.practice_history().is_empty());
    }

    #[test]
    fn test_reset_question_keeps_analysis_and_history() {
        let mut store = populated();
        store.reset_question();

        assert!(store.current_question().is_none());
        assert_eq!(store.current_answer(), "");
        assert!(store.model_answer().is_none());
        assert!(store.evaluation().is_none());
        assert!(store.current_job_analysis().is_some());
        assert_eq!(store.practice_history().len(), 1);
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut store = populated();
        store.reset_all();

        assert!(store.current_job_analysis().is_none());
        assert!(store.current_question().is_none());
        assert_eq!(store.current_answer(), "");
        assert!(store.model_answer().is_none());
        assert!(store.evaluation().is_none());
        assert!(!store.is_loading());
        assert!(store.practice_history().is_empty());
    }

    #[test]
    fn test_new_question_clears_previous_attempt() {
        let mut store = populated();
        store.set_current_question(Some(question("2", "SQL & Databases")));

        assert_eq!(store.current_question().unwrap().id, "2");
        assert_eq!(store.current_answer(), "");
        assert!(store.model_answer().is_none());
        assert!(store.evaluation().is_none());
        assert!(store.current_job_analysis().is_some());
    }

    #[test]
    fn test_history_appends_in_order() {
        let mut store = AppStore::new();
        for i in 0..5 {
            store.add_practice_entry(PracticeEntry::new(
                question(&i.to_string(), "Python"),
                format!("answer {i}"),
                None,
                Some(evaluation(i as f64)),
            ));
        }
        let ids: Vec<&str> = store
            .practice_history()
            .iter()
            .map(|e| e.question.id.as_str())
            .collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_record_practice_requires_question() {
        let mut store = AppStore::new();
        store.set_current_answer("orphan answer");
        assert!(store.record_practice().is_none());
        assert!(store.practice_history().is_empty());
    }

    #[test]
    fn test_record_practice_snapshots_triple() {
        let store = populated();
        let entry = &store.practice_history()[0];
        assert_eq!(entry.user_answer, "My answer");
        assert_eq!(entry.model_answer.as_ref().unwrap().detailed_answer, "Model");
        assert_eq!(entry.overall_score(), Some(7.0));
    }

    #[test]
    fn test_explainer_setters() {
        let mut state = ExplainerState::default();
        state.set_term("OAuth");
        state.set_error(Some("boom".into()));
        state.set_is_loading(true);
        assert_eq!(state.term, "OAuth");
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(state.is_loading);
    }
}
