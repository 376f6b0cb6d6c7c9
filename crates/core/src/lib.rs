#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod submission;
pub mod time;

pub use error::{CatalogError, GuardViolation};
pub use session::{AssessmentSession, Phase, SessionState, SubmissionFailure, SubmissionTicket};
pub use submission::{AnswerEntry, SubmissionPayload, build_payload};
pub use time::Clock;
