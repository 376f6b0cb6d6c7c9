use std::sync::Arc;

use aptitude_core::SubmissionPayload;
use aptitude_core::model::{CareerCatalog, Question, ScoredResult};
use async_trait::async_trait;
use thiserror::Error;

use crate::http::{GatewayConfig, HttpGateway};
use crate::memory::InMemoryGateway;

/// Errors surfaced by collaborator adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("scorer returned no category scores or recommendations")]
    EmptyResult,

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Source of the static reference data shown during an assessment.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch the ordered question list.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the source is unreachable or the body is not
    /// a question list.
    async fn fetch_questions(&self) -> Result<Vec<Question>, GatewayError>;

    /// Fetch careers grouped by category.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the source is unreachable or the body is not
    /// a category map.
    async fn fetch_careers(&self) -> Result<CareerCatalog, GatewayError>;
}

/// Scores a finished assessment.
#[async_trait]
pub trait ScoringGateway: Send + Sync {
    /// Submit answers and return category scores plus ranked matches.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure or an undecodable response.
    async fn submit(&self, payload: &SubmissionPayload) -> Result<ScoredResult, GatewayError>;
}

/// Both collaborators behind trait objects so the backend can be swapped.
#[derive(Clone)]
pub struct Gateway {
    pub catalog: Arc<dyn CatalogGateway>,
    pub scoring: Arc<dyn ScoringGateway>,
}

impl Gateway {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogGateway>, scoring: Arc<dyn ScoringGateway>) -> Self {
        Self { catalog, scoring }
    }

    /// HTTP gateway for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Http` if the HTTP client cannot be built.
    pub fn http(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Arc::new(HttpGateway::new(config)?);
        let catalog: Arc<dyn CatalogGateway> = client.clone();
        let scoring: Arc<dyn ScoringGateway> = client;
        Ok(Self { catalog, scoring })
    }

    #[must_use]
    pub fn in_memory(backend: InMemoryGateway) -> Self {
        let catalog: Arc<dyn CatalogGateway> = Arc::new(backend.clone());
        let scoring: Arc<dyn ScoringGateway> = Arc::new(backend);
        Self { catalog, scoring }
    }
}
