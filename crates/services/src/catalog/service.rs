use std::fmt;
use std::sync::Arc;

use aptitude_core::model::{CareerCatalog, QuestionCatalog};
use gateway::CatalogGateway;
use log::{info, warn};

use super::status::{CatalogSource, SourceStatus};
use crate::error::CatalogLoadError;

/// Holds the fetched question list and career catalog.
///
/// Each source has its own status: a careers failure never blocks the
/// assessment, which only needs questions. Nothing is retried on its own;
/// `retry` is for an explicit user action.
pub struct CatalogService {
    gateway: Arc<dyn CatalogGateway>,
    questions: SourceStatus<Arc<QuestionCatalog>>,
    careers: SourceStatus<Arc<CareerCatalog>>,
}

impl CatalogService {
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            questions: SourceStatus::Loading,
            careers: SourceStatus::Loading,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &SourceStatus<Arc<QuestionCatalog>> {
        &self.questions
    }

    #[must_use]
    pub fn careers(&self) -> &SourceStatus<Arc<CareerCatalog>> {
        &self.careers
    }

    /// Fetch every source that is still loading, concurrently.
    ///
    /// Sources that already settled (ready or failed) are left alone, so
    /// calling this again is harmless.
    pub async fn load(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        let fetch_questions = self.questions.is_loading();
        let fetch_careers = self.careers.is_loading();

        let (questions, careers) = tokio::join!(
            async {
                if fetch_questions {
                    Some(load_questions(gateway.as_ref()).await)
                } else {
                    None
                }
            },
            async {
                if fetch_careers {
                    Some(load_careers(gateway.as_ref()).await)
                } else {
                    None
                }
            },
        );

        if let Some(outcome) = questions {
            self.questions = settle(CatalogSource::Questions, outcome);
        }
        if let Some(outcome) = careers {
            self.careers = settle(CatalogSource::Careers, outcome);
        }
    }

    /// Put failed sources back to loading and load again.
    pub async fn retry(&mut self) {
        if matches!(self.questions, SourceStatus::Error(_)) {
            self.questions = SourceStatus::Loading;
        }
        if matches!(self.careers, SourceStatus::Error(_)) {
            self.careers = SourceStatus::Loading;
        }
        self.load().await;
    }
}

async fn load_questions(
    gateway: &dyn CatalogGateway,
) -> Result<Arc<QuestionCatalog>, CatalogLoadError> {
    let questions = gateway
        .fetch_questions()
        .await
        .map_err(|error| CatalogLoadError::Fetch {
            source_kind: CatalogSource::Questions,
            error,
        })?;
    Ok(Arc::new(QuestionCatalog::new(questions)?))
}

async fn load_careers(gateway: &dyn CatalogGateway) -> Result<Arc<CareerCatalog>, CatalogLoadError> {
    gateway
        .fetch_careers()
        .await
        .map(Arc::new)
        .map_err(|error| CatalogLoadError::Fetch {
            source_kind: CatalogSource::Careers,
            error,
        })
}

fn settle<T>(source: CatalogSource, outcome: Result<T, CatalogLoadError>) -> SourceStatus<T> {
    match outcome {
        Ok(value) => {
            info!("{source} catalog ready");
            SourceStatus::Ready(value)
        }
        Err(err) => {
            warn!("{source} catalog failed: {err}");
            SourceStatus::Error(err)
        }
    }
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("questions", &self.questions)
            .field("careers", &self.careers)
            .finish_non_exhaustive()
    }
}
