use std::fmt;

use crate::error::CatalogLoadError;

/// Which half of the reference data a status or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSource {
    Questions,
    Careers,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Questions => f.write_str("questions"),
            CatalogSource::Careers => f.write_str("careers"),
        }
    }
}

/// Load status of one catalog source.
#[derive(Debug)]
pub enum SourceStatus<T> {
    Loading,
    Ready(T),
    Error(CatalogLoadError),
}

impl<T> SourceStatus<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SourceStatus::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, SourceStatus::Ready(_))
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            SourceStatus::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&CatalogLoadError> {
        match self {
            SourceStatus::Error(err) => Some(err),
            _ => None,
        }
    }
}
