use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a question by the question bank.
///
/// The bank is free to use numbers or strings, so both are accepted and the
/// original shape is preserved when the id is sent back in a submission.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl QuestionId {
    #[must_use]
    pub fn number(id: i64) -> Self {
        Self::Number(id)
    }

    #[must_use]
    pub fn text(id: impl Into<String>) -> Self {
        Self::Text(id.into())
    }
}

impl From<i64> for QuestionId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// Identifier of the person taking the assessment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(id) => write!(f, "QuestionId({id})"),
            QuestionId::Text(id) => write!(f, "QuestionId({id:?})"),
        }
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(id) => write!(f, "{id}"),
            QuestionId::Text(id) => f.write_str(id),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_keeps_wire_shape() {
        let numeric: QuestionId = serde_json::from_str("7").unwrap();
        let textual: QuestionId = serde_json::from_str("\"logic-3\"").unwrap();

        assert_eq!(numeric, QuestionId::number(7));
        assert_eq!(textual, QuestionId::text("logic-3"));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");
        assert_eq!(serde_json::to_string(&textual).unwrap(), "\"logic-3\"");
    }

    #[test]
    fn user_id_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&UserId::new(1)).unwrap(), "1");
    }
}
