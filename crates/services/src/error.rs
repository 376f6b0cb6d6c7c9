//! Shared error types for the services crate.

use thiserror::Error;

use aptitude_core::CatalogError;
use gateway::GatewayError;

use crate::catalog::CatalogSource;

/// A catalog source could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("{source_kind} could not be fetched: {error}")]
    Fetch {
        source_kind: CatalogSource,
        #[source]
        error: GatewayError,
    },
    #[error("questions are unusable: {0}")]
    InvalidQuestions(#[from] CatalogError),
}

impl CatalogLoadError {
    #[must_use]
    pub fn source_kind(&self) -> CatalogSource {
        match self {
            CatalogLoadError::Fetch { source_kind, .. } => *source_kind,
            CatalogLoadError::InvalidQuestions(_) => CatalogSource::Questions,
        }
    }
}

/// The scorer could not produce a result. Retryable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("scoring request failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("scorer returned no category scores or recommendations")]
    EmptyResult,
}

/// An assessment cannot start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("questions are still loading")]
    CatalogLoading,
    #[error("questions unavailable: {reason}")]
    CatalogUnavailable { reason: String },
}
