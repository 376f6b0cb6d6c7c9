use thiserror::Error;

use crate::model::QuestionId;

/// Reasons a fetched question list cannot become a usable catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question catalog is empty")]
    Empty,

    #[error("question {question_id} has no options")]
    NoOptions { question_id: QuestionId },

    #[error("question id {question_id} appears more than once")]
    DuplicateId { question_id: QuestionId },
}

/// An operation was invoked outside the state it is valid in.
///
/// The session never changes when one of these is returned. Callers are
/// expected to disable the corresponding action instead of surfacing these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuardViolation {
    #[error("session is not accepting answers")]
    NotInProgress,

    #[error("option {option} is out of range for a question with {available} options")]
    OptionOutOfRange { option: usize, available: usize },

    #[error("question {index} has not been answered")]
    Unanswered { index: usize },

    #[error("already on the last question")]
    AtLastQuestion,

    #[error("question {index} is not the last question")]
    NotLastQuestion { index: usize },

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("no submission is in flight")]
    NotSubmitting,

    #[error("response for generation {received} ignored, session is at generation {current}")]
    StaleResponse { received: u64, current: u64 },
}
