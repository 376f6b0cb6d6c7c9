#![forbid(unsafe_code)]

pub mod assessment;
pub mod catalog;
pub mod error;

pub use aptitude_core::Clock;

pub use assessment::{AssessmentProgress, AssessmentService};
pub use catalog::{CatalogService, CatalogSource, SourceStatus};
pub use error::{AssessmentError, CatalogLoadError, SubmissionError};
