use std::sync::{Arc, Mutex, MutexGuard};

use aptitude_core::SubmissionPayload;
use aptitude_core::model::{CareerCatalog, Question, QuestionCatalog, ScoredResult};
use async_trait::async_trait;

use crate::demo;
use crate::repository::{CatalogGateway, GatewayError, ScoringGateway};

#[derive(Default)]
struct State {
    questions: Vec<Question>,
    careers: CareerCatalog,
    result: Option<ScoredResult>,
    questions_failure: Option<String>,
    careers_failure: Option<String>,
    submit_failure: Option<String>,
    submissions: Vec<SubmissionPayload>,
}

/// In-memory collaborator for tests and offline runs.
///
/// Without a canned result, submissions are scored with the built-in demo
/// scorer against the stored questions.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the built-in demo questions and careers.
    #[must_use]
    pub fn demo() -> Self {
        Self::new()
            .with_questions(demo::questions())
            .with_careers(demo::careers())
    }

    #[must_use]
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        self.update(|state| state.questions = questions);
        self
    }

    #[must_use]
    pub fn with_careers(self, careers: CareerCatalog) -> Self {
        self.update(|state| state.careers = careers);
        self
    }

    #[must_use]
    pub fn with_result(self, result: ScoredResult) -> Self {
        self.update(|state| state.result = Some(result));
        self
    }

    pub fn fail_questions(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.update(|state| state.questions_failure = Some(reason));
    }

    pub fn recover_questions(&self) {
        self.update(|state| state.questions_failure = None);
    }

    pub fn fail_careers(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.update(|state| state.careers_failure = Some(reason));
    }

    /// Make every following submission fail until `recover_submissions`.
    pub fn fail_submissions(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.update(|state| state.submit_failure = Some(reason));
    }

    pub fn recover_submissions(&self) {
        self.update(|state| state.submit_failure = None);
    }

    /// Payloads received so far, including failed attempts.
    #[must_use]
    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.lock()
            .map(|state| state.submissions.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, GatewayError> {
        self.state
            .lock()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))
    }

    fn update(&self, apply: impl FnOnce(&mut State)) {
        if let Ok(mut state) = self.state.lock() {
            apply(&mut state);
        }
    }
}

#[async_trait]
impl CatalogGateway for InMemoryGateway {
    async fn fetch_questions(&self) -> Result<Vec<Question>, GatewayError> {
        let state = self.lock()?;
        if let Some(reason) = &state.questions_failure {
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        Ok(state.questions.clone())
    }

    async fn fetch_careers(&self) -> Result<CareerCatalog, GatewayError> {
        let state = self.lock()?;
        if let Some(reason) = &state.careers_failure {
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        Ok(state.careers.clone())
    }
}

#[async_trait]
impl ScoringGateway for InMemoryGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<ScoredResult, GatewayError> {
        let mut state = self.lock()?;
        state.submissions.push(payload.clone());
        if let Some(reason) = &state.submit_failure {
            return Err(GatewayError::Unavailable(reason.clone()));
        }
        if let Some(result) = &state.result {
            return Ok(result.clone());
        }

        let catalog = QuestionCatalog::new(state.questions.clone())
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        Ok(demo::score(&catalog, payload))
    }
}
