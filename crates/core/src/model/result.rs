use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Score for one aptitude category.
///
/// Only `percentage` is interpreted; anything else the scorer sends is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub percentage: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CategoryScore {
    #[must_use]
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub category_scores: Option<IndexMap<String, CategoryScore>>,
}

/// A ranked career match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub career_title: String,
    #[serde(default)]
    pub reasoning: String,
    pub match_percentage: f64,
}

/// Scorer response for a completed assessment.
///
/// Either half may be missing so a partial response still produces a
/// result, but a response with neither is not a result at all; see
/// `is_empty`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(default)]
    pub results: Option<ScoreBreakdown>,
    #[serde(default)]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl ScoredResult {
    #[must_use]
    pub fn new(
        category_scores: IndexMap<String, CategoryScore>,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        Self {
            results: Some(ScoreBreakdown {
                category_scores: Some(category_scores),
            }),
            recommendations: Some(recommendations),
        }
    }

    #[must_use]
    pub fn category_scores(&self) -> Option<&IndexMap<String, CategoryScore>> {
        self.results
            .as_ref()
            .and_then(|results| results.category_scores.as_ref())
    }

    #[must_use]
    pub fn recommendations(&self) -> Option<&[Recommendation]> {
        self.recommendations.as_deref()
    }

    /// True when neither category scores nor recommendations are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category_scores().is_none() && self.recommendations().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_response_in_order() {
        let raw = r#"{
            "results": {
                "category_scores": {
                    "verbal": {"percentage": 66.6, "correct": 2, "total": 3},
                    "logical_reasoning": {"percentage": 100.0}
                }
            },
            "recommendations": [
                {"career_title": "Lawyer", "reasoning": "Strong verbal", "match_percentage": 87.5}
            ]
        }"#;
        let result: ScoredResult = serde_json::from_str(raw).unwrap();

        let scores = result.category_scores().unwrap();
        let keys: Vec<&str> = scores.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["verbal", "logical_reasoning"]);
        assert_eq!(scores["verbal"].extra.get("total"), Some(&Value::from(3)));
        assert_eq!(result.recommendations().unwrap()[0].career_title, "Lawyer");
    }

    #[test]
    fn tolerates_missing_sections() {
        let result: ScoredResult =
            serde_json::from_str(r#"{"recommendations": [{"career_title": "Nurse", "match_percentage": 70}]}"#)
                .unwrap();
        assert!(result.category_scores().is_none());
        assert!(!result.is_empty());

        let result: ScoredResult = serde_json::from_str(r#"{"results": {}}"#).unwrap();
        assert!(result.category_scores().is_none());
        assert!(result.is_empty());
    }

    #[test]
    fn error_body_has_no_sections() {
        let result: ScoredResult =
            serde_json::from_str(r#"{"error": "scoring engine crashed"}"#).unwrap();
        assert!(result.is_empty());
        assert!(ScoredResult::default().is_empty());
    }
}
