use std::collections::HashMap;

use crate::model::{Question, QuestionCatalog, QuestionId};

/// Selected option per answered question.
///
/// Keyed by question id rather than position so a selection stays attached
/// to its question even if positions shift; positions are resolved through
/// the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    selections: HashMap<QuestionId, usize>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the selection for a question.
    pub fn record(&mut self, question_id: QuestionId, option: usize) {
        self.selections.insert(question_id, option);
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId) -> Option<usize> {
        self.selections.get(question_id).copied()
    }

    /// Selection for the question at `index` in `catalog`.
    #[must_use]
    pub fn answer_at(&self, catalog: &QuestionCatalog, index: usize) -> Option<usize> {
        catalog
            .get(index)
            .and_then(|question| self.get(question.id()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// `(question, option)` pairs in catalog order, skipping unanswered
    /// questions and ids the catalog does not know.
    pub fn in_catalog_order<'a>(
        &'a self,
        catalog: &'a QuestionCatalog,
    ) -> impl Iterator<Item = (&'a Question, usize)> + 'a {
        catalog
            .iter()
            .filter_map(|question| self.get(question.id()).map(|option| (question, option)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(
            (0..3_i64)
                .map(|id| Question::new(id, format!("Q{id}"), vec!["a".into(), "b".into()], "x"))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn reselection_overwrites() {
        let mut answers = AnswerMap::new();
        answers.record(QuestionId::number(1), 0);
        answers.record(QuestionId::number(1), 1);

        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(&QuestionId::number(1)), Some(1));
    }

    #[test]
    fn catalog_order_ignores_entry_order() {
        let catalog = catalog();
        let mut answers = AnswerMap::new();
        answers.record(QuestionId::number(2), 1);
        answers.record(QuestionId::number(0), 0);
        answers.record(QuestionId::number(42), 1);

        let ordered: Vec<_> = answers
            .in_catalog_order(&catalog)
            .map(|(question, option)| (question.id().clone(), option))
            .collect();
        assert_eq!(
            ordered,
            vec![(QuestionId::number(0), 0), (QuestionId::number(2), 1)]
        );
        assert_eq!(answers.answer_at(&catalog, 1), None);
        assert_eq!(answers.answer_at(&catalog, 2), Some(1));
    }
}
