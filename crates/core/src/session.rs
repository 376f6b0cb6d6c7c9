use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::GuardViolation;
use crate::model::{AnswerMap, Question, QuestionCatalog, ScoredResult, UserId};
use crate::submission::{SubmissionPayload, build_payload};
use crate::time::Clock;

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// Why the scorer could not produce a result. Answers are kept, so the
/// submission can be retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    message: String,
}

impl SubmissionFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    InProgress { index: usize },
    Submitting,
    Completed(ScoredResult),
    SubmitFailed(SubmissionFailure),
}

impl SessionState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::InProgress { .. } => Phase::InProgress,
            SessionState::Submitting => Phase::Submitting,
            SessionState::Completed(_) => Phase::Completed,
            SessionState::SubmitFailed(_) => Phase::SubmitFailed,
        }
    }
}

/// Data-free view of `SessionState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Submitting,
    Completed,
    SubmitFailed,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::InProgress => "in-progress",
            Phase::Submitting => "submitting",
            Phase::Completed => "completed",
            Phase::SubmitFailed => "error",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handed out when a submission starts. The response must be reported back
/// with the same generation; anything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct SubmissionTicket {
    generation: u64,
    payload: SubmissionPayload,
}

impl SubmissionTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn payload(&self) -> &SubmissionPayload {
        &self.payload
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at the assessment.
///
/// Plain data with guarded transitions: every operation either applies fully
/// or returns a `GuardViolation` and leaves the session untouched. The
/// current index only moves forward and stays below the question count.
pub struct AssessmentSession {
    catalog: Arc<QuestionCatalog>,
    answers: AnswerMap,
    current: usize,
    state: SessionState,
    generation: u64,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    #[must_use]
    pub fn new(catalog: Arc<QuestionCatalog>, clock: Clock) -> Self {
        Self {
            catalog,
            answers: AnswerMap::new(),
            current: 0,
            state: SessionState::InProgress { index: 0 },
            generation: 0,
            clock,
            started_at: clock.now(),
            completed_at: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.catalog.last_index()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current == self.last_index()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.get(self.current)
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<usize> {
        self.answers.answer_at(&self.catalog, index)
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answer_at(self.current)
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoredResult> {
        match &self.state {
            SessionState::Completed(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&SubmissionFailure> {
        match &self.state {
            SessionState::SubmitFailed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Bumped on every reset; used to discard responses for older attempts.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Record `option` for the current question without moving on.
    ///
    /// # Errors
    ///
    /// Returns `GuardViolation::NotInProgress` outside `InProgress` and
    /// `GuardViolation::OptionOutOfRange` for an option the question lacks.
    pub fn select_answer(&mut self, option: usize) -> Result<(), GuardViolation> {
        if !matches!(self.state, SessionState::InProgress { .. }) {
            return Err(GuardViolation::NotInProgress);
        }
        let question = self
            .catalog
            .get(self.current)
            .ok_or(GuardViolation::NotInProgress)?;
        if option >= question.option_count() {
            return Err(GuardViolation::OptionOutOfRange {
                option,
                available: question.option_count(),
            });
        }

        let question_id = question.id().clone();
        self.answers.record(question_id, option);
        Ok(())
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.check_advance().is_ok()
    }

    /// Move to the next question and return its index.
    ///
    /// # Errors
    ///
    /// Returns `GuardViolation::NotInProgress`, `GuardViolation::AtLastQuestion`
    /// or `GuardViolation::Unanswered` when the move is not allowed.
    pub fn advance(&mut self) -> Result<usize, GuardViolation> {
        self.check_advance()?;
        self.current += 1;
        self.state = SessionState::InProgress {
            index: self.current,
        };
        Ok(self.current)
    }

    fn check_advance(&self) -> Result<(), GuardViolation> {
        if !matches!(self.state, SessionState::InProgress { .. }) {
            return Err(GuardViolation::NotInProgress);
        }
        if self.current >= self.last_index() {
            return Err(GuardViolation::AtLastQuestion);
        }
        if self.current_answer().is_none() {
            return Err(GuardViolation::Unanswered {
                index: self.current,
            });
        }
        Ok(())
    }

    /// True when `begin_submission` would be accepted: on the last question,
    /// answered, and not already submitted or submitting.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        self.check_finish().is_ok()
    }

    /// Enter `Submitting` and build the request for the scorer.
    ///
    /// Allowed from `InProgress` and, as a retry, from `SubmitFailed`.
    ///
    /// # Errors
    ///
    /// Returns `GuardViolation::AlreadySubmitting` while a submission is in
    /// flight, `GuardViolation::NotInProgress` once completed,
    /// `GuardViolation::NotLastQuestion` before the last question and
    /// `GuardViolation::Unanswered` if the last question has no answer.
    pub fn begin_submission(&mut self, user_id: UserId) -> Result<SubmissionTicket, GuardViolation> {
        self.check_finish()?;
        self.state = SessionState::Submitting;
        Ok(SubmissionTicket {
            generation: self.generation,
            payload: build_payload(&self.answers, &self.catalog, user_id),
        })
    }

    fn check_finish(&self) -> Result<(), GuardViolation> {
        match self.state {
            SessionState::InProgress { .. } | SessionState::SubmitFailed(_) => {}
            SessionState::Submitting => return Err(GuardViolation::AlreadySubmitting),
            SessionState::Completed(_) => return Err(GuardViolation::NotInProgress),
        }
        if !self.is_last_question() {
            return Err(GuardViolation::NotLastQuestion {
                index: self.current,
            });
        }
        if self.current_answer().is_none() {
            return Err(GuardViolation::Unanswered {
                index: self.current,
            });
        }
        Ok(())
    }

    /// Apply the scorer's outcome for the submission started at `generation`.
    ///
    /// # Errors
    ///
    /// Returns `GuardViolation::StaleResponse` if the session was reset since
    /// the submission started and `GuardViolation::NotSubmitting` if no
    /// submission is in flight.
    pub fn complete_submission(
        &mut self,
        generation: u64,
        outcome: Result<ScoredResult, SubmissionFailure>,
    ) -> Result<Phase, GuardViolation> {
        if generation != self.generation {
            return Err(GuardViolation::StaleResponse {
                received: generation,
                current: self.generation,
            });
        }
        if !matches!(self.state, SessionState::Submitting) {
            return Err(GuardViolation::NotSubmitting);
        }

        self.state = match outcome {
            Ok(result) => {
                self.completed_at = Some(self.clock.now());
                SessionState::Completed(result)
            }
            Err(failure) => SessionState::SubmitFailed(failure),
        };
        Ok(self.state.phase())
    }

    /// Start over: first question, no answers, no result. Valid from any state.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.answers.clear();
        self.current = 0;
        self.state = SessionState::InProgress { index: 0 };
        self.started_at = self.clock.now();
        self.completed_at = None;
    }
}

impl fmt::Debug for AssessmentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentSession")
            .field("questions", &self.catalog.len())
            .field("current", &self.current)
            .field("answered", &self.answers.len())
            .field("phase", &self.phase())
            .field("generation", &self.generation)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
