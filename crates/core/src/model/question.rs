use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::QuestionId;

/// A single multiple-choice question as served by the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    question_id: QuestionId,
    question: String,
    options: Vec<String>,
    #[serde(default)]
    category: String,
}

impl Question {
    #[must_use]
    pub fn new(
        question_id: impl Into<QuestionId>,
        question: impl Into<String>,
        options: Vec<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question: question.into(),
            options,
            category: category.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Ordered, validated question list for one assessment.
///
/// Guaranteed non-empty, every question has at least one option and ids are
/// unique, so positions `0..len()` are all addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    positions: HashMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Validate a fetched question list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` for an empty list,
    /// `CatalogError::NoOptions` if a question offers nothing to choose and
    /// `CatalogError::DuplicateId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut positions = HashMap::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(CatalogError::NoOptions {
                    question_id: question.question_id.clone(),
                });
            }
            if positions.insert(question.question_id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId {
                    question_id: question.question_id.clone(),
                });
            }
        }

        Ok(Self {
            questions,
            positions,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
