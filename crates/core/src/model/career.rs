use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A career entry from the career catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub growth: Option<String>,
}

/// Careers grouped by category, in the order the catalog returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CareerCatalog(IndexMap<String, Vec<Career>>);

impl CareerCatalog {
    #[must_use]
    pub fn new(categories: IndexMap<String, Vec<Career>>) -> Self {
        Self(categories)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Career])> {
        self.0
            .iter()
            .map(|(name, careers)| (name.as_str(), careers.as_slice()))
    }
}
