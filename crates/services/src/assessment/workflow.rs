use std::sync::Arc;

use aptitude_core::model::{QuestionCatalog, ScoredResult, UserId};
use aptitude_core::{AssessmentSession, GuardViolation, Phase, SubmissionFailure, SubmissionTicket};
use gateway::ScoringGateway;
use log::{debug, info, warn};

use crate::Clock;
use crate::catalog::{CatalogService, SourceStatus};
use crate::error::{AssessmentError, SubmissionError};

/// Drives an `AssessmentSession` against the scoring collaborator.
///
/// Guard violations from the session are logged and turned into no-ops
/// here; callers get `false`/`None` and the session is unchanged.
#[derive(Clone)]
pub struct AssessmentService {
    clock: Clock,
    scoring: Arc<dyn ScoringGateway>,
    user_id: UserId,
}

impl AssessmentService {
    #[must_use]
    pub fn new(clock: Clock, scoring: Arc<dyn ScoringGateway>, user_id: UserId) -> Self {
        Self {
            clock,
            scoring,
            user_id,
        }
    }

    /// Start a session once the question catalog is ready.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::CatalogLoading` before the catalog settled
    /// and `AssessmentError::CatalogUnavailable` if it failed.
    pub fn start(&self, catalogs: &CatalogService) -> Result<AssessmentSession, AssessmentError> {
        match catalogs.questions() {
            SourceStatus::Loading => Err(AssessmentError::CatalogLoading),
            SourceStatus::Error(err) => Err(AssessmentError::CatalogUnavailable {
                reason: err.to_string(),
            }),
            SourceStatus::Ready(catalog) => Ok(self.start_with(Arc::clone(catalog))),
        }
    }

    #[must_use]
    pub fn start_with(&self, catalog: Arc<QuestionCatalog>) -> AssessmentSession {
        info!("starting assessment with {} questions", catalog.len());
        AssessmentSession::new(catalog, self.clock)
    }

    /// Returns whether the selection was recorded.
    pub fn select_answer(&self, session: &mut AssessmentSession, option: usize) -> bool {
        neutralize("select_answer", session.select_answer(option)).is_some()
    }

    /// Returns whether the session moved to the next question.
    pub fn advance(&self, session: &mut AssessmentSession) -> bool {
        neutralize("advance", session.advance()).is_some()
    }

    pub fn reset(&self, session: &mut AssessmentSession) {
        session.reset();
        debug!("session reset to generation {}", session.generation());
    }

    /// Start a submission. `None` if the session cannot finish right now,
    /// including while another submission is in flight.
    pub fn begin(&self, session: &mut AssessmentSession) -> Option<SubmissionTicket> {
        neutralize("finish", session.begin_submission(self.user_id))
    }

    /// Send a ticket's payload to the scorer.
    ///
    /// Does not touch the session, so the caller can keep accepting
    /// `reset` while the request is in flight.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError` on transport or decode failure, and
    /// `SubmissionError::EmptyResult` when the response carries neither
    /// category scores nor recommendations.
    pub async fn submit(&self, ticket: &SubmissionTicket) -> Result<ScoredResult, SubmissionError> {
        let result = self.scoring.submit(ticket.payload()).await?;
        if result.is_empty() {
            return Err(SubmissionError::EmptyResult);
        }
        Ok(result)
    }

    /// Apply a scorer outcome. Responses for a reset session are dropped.
    pub fn settle(
        &self,
        session: &mut AssessmentSession,
        ticket: &SubmissionTicket,
        outcome: Result<ScoredResult, SubmissionError>,
    ) -> Option<Phase> {
        let outcome = outcome.map_err(|err| SubmissionFailure::new(err.to_string()));
        let phase = neutralize(
            "settle",
            session.complete_submission(ticket.generation(), outcome),
        )?;
        match session.failure() {
            Some(failure) => warn!("submission failed: {}", failure.message()),
            None => info!("assessment {phase}"),
        }
        Some(phase)
    }

    /// `begin`, `submit` and `settle` in one step for callers that own the
    /// session for the duration of the request.
    pub async fn finish(&self, session: &mut AssessmentSession) -> Option<Phase> {
        let ticket = self.begin(session)?;
        let outcome = self.submit(&ticket).await;
        self.settle(session, &ticket, outcome)
    }
}

fn neutralize<T>(operation: &str, result: Result<T, GuardViolation>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            debug!("{operation} ignored: {violation}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptitude_core::model::Question;
    use aptitude_core::time::fixed_clock;
    use gateway::InMemoryGateway;

    fn catalog() -> Arc<QuestionCatalog> {
        Arc::new(
            QuestionCatalog::new(vec![
                Question::new(1_i64, "A", vec!["x".into(), "y".into()], "verbal"),
                Question::new(2_i64, "B", vec!["x".into(), "y".into()], "numerical"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn guard_violations_become_no_ops() {
        let service = AssessmentService::new(
            fixed_clock(),
            Arc::new(InMemoryGateway::demo()),
            UserId::new(1),
        );
        let mut session = service.start_with(catalog());

        assert!(!service.advance(&mut session));
        assert!(!service.select_answer(&mut session, 9));
        assert!(service.begin(&mut session).is_none());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn stale_failure_is_dropped() {
        let service = AssessmentService::new(
            fixed_clock(),
            Arc::new(InMemoryGateway::demo()),
            UserId::new(1),
        );
        let mut session = service.start_with(catalog());
        assert!(service.select_answer(&mut session, 0));
        assert!(service.advance(&mut session));
        assert!(service.select_answer(&mut session, 1));
        let ticket = service.begin(&mut session).unwrap();

        service.reset(&mut session);
        let outcome = Err(SubmissionError::EmptyResult);

        assert_eq!(service.settle(&mut session, &ticket, outcome), None);
        assert_eq!(session.phase(), Phase::InProgress);
        assert!(session.failure().is_none());
        assert!(session.answers().is_empty());
    }

    #[tokio::test]
    async fn empty_result_leaves_session_retryable() {
        let backend = InMemoryGateway::demo().with_result(ScoredResult::default());
        let service =
            AssessmentService::new(fixed_clock(), Arc::new(backend.clone()), UserId::new(1));
        let mut session = service.start_with(catalog());
        assert!(service.select_answer(&mut session, 0));
        assert!(service.advance(&mut session));
        assert!(service.select_answer(&mut session, 1));

        assert_eq!(service.finish(&mut session).await, Some(Phase::SubmitFailed));
        assert!(session.can_finish());
        assert_eq!(session.answers().len(), 2);
    }

    #[test]
    fn start_reports_catalog_status() {
        let backend = InMemoryGateway::new();
        let service =
            AssessmentService::new(fixed_clock(), Arc::new(backend.clone()), UserId::new(1));
        let catalogs = CatalogService::new(Arc::new(backend));

        assert_eq!(
            service.start(&catalogs).unwrap_err(),
            AssessmentError::CatalogLoading
        );
    }
}
