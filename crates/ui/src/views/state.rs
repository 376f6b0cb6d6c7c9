use services::{CatalogService, SourceStatus};

use crate::vm::{CareerCategoryVm, map_career_catalog};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    QuestionsUnavailable,
    CareersUnavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::QuestionsUnavailable => {
                "Failed to load test questions. Please ensure the backend server is running."
            }
            ViewError::CareersUnavailable => {
                "Failed to load careers. Please ensure the backend server is running."
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(ViewError),
}

/// Career explorer state; independent of the question catalog.
#[must_use]
pub fn careers_view_state(catalogs: &CatalogService) -> ViewState<Vec<CareerCategoryVm>> {
    match catalogs.careers() {
        SourceStatus::Loading => ViewState::Loading,
        SourceStatus::Ready(catalog) => ViewState::Ready(map_career_catalog(catalog)),
        SourceStatus::Error(_) => ViewState::Error(ViewError::CareersUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use gateway::InMemoryGateway;

    #[tokio::test]
    async fn careers_follow_their_own_status() {
        let backend = InMemoryGateway::demo();
        backend.fail_questions("bank offline");
        let mut catalogs = CatalogService::new(Arc::new(backend));
        assert_eq!(careers_view_state(&catalogs), ViewState::Loading);

        catalogs.load().await;

        let ViewState::Ready(categories) = careers_view_state(&catalogs) else {
            panic!("careers should load while questions fail");
        };
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].label, "Technology");
    }

    #[tokio::test]
    async fn careers_error_has_a_message() {
        let backend = InMemoryGateway::demo();
        backend.fail_careers("offline");
        let mut catalogs = CatalogService::new(Arc::new(backend));
        catalogs.load().await;

        assert_eq!(
            careers_view_state(&catalogs),
            ViewState::Error(ViewError::CareersUnavailable)
        );
        assert!(ViewError::CareersUnavailable.message().contains("careers"));
    }
}
