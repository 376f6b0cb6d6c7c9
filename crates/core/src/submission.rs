use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, QuestionCatalog, QuestionId, UserId};

/// One answered question in the scoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub question_id: QuestionId,
    pub user_answer: usize,
}

/// Body of the scoring request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub answers: Vec<AnswerEntry>,
    pub user_id: UserId,
}

impl SubmissionPayload {
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Build the scoring request from recorded answers.
///
/// Entries follow catalog order and only answered questions are emitted,
/// so the output depends only on the inputs, not on when answers were given.
#[must_use]
pub fn build_payload(
    answers: &AnswerMap,
    catalog: &QuestionCatalog,
    user_id: UserId,
) -> SubmissionPayload {
    let answers = answers
        .in_catalog_order(catalog)
        .map(|(question, option)| AnswerEntry {
            question_id: question.id().clone(),
            user_answer: option,
        })
        .collect();

    SubmissionPayload { answers, user_id }
}
