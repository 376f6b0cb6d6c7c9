use aptitude_core::model::{CategoryScore, Recommendation, ScoredResult};

use crate::vm::labels::{format_percentage, humanize_category};

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryScoreVm {
    pub key: String,
    pub label: String,
    /// Raw scorer value, kept for comparisons.
    pub percentage: f64,
    pub percentage_str: String,
}

impl CategoryScoreVm {
    fn new(key: &str, score: &CategoryScore) -> Self {
        Self {
            key: key.to_string(),
            label: humanize_category(key),
            percentage: score.percentage,
            percentage_str: format_percentage(score.percentage),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationVm {
    pub title: String,
    pub reasoning: String,
    pub match_percentage: f64,
    pub match_str: String,
}

impl From<&Recommendation> for RecommendationVm {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            title: recommendation.career_title.clone(),
            reasoning: recommendation.reasoning.clone(),
            match_percentage: recommendation.match_percentage,
            match_str: format!("Match: {}", format_percentage(recommendation.match_percentage)),
        }
    }
}

/// Display model for a scored assessment.
///
/// Categories and recommendations keep the scorer's order. Missing sections
/// become empty lists rather than failing the whole view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultVm {
    pub categories: Vec<CategoryScoreVm>,
    pub recommendations: Vec<RecommendationVm>,
}

impl ResultVm {
    #[must_use]
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    #[must_use]
    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

impl From<&ScoredResult> for ResultVm {
    fn from(result: &ScoredResult) -> Self {
        let categories = result
            .category_scores()
            .map(|scores| {
                scores
                    .iter()
                    .map(|(key, score)| CategoryScoreVm::new(key, score))
                    .collect()
            })
            .unwrap_or_default();
        let recommendations = result
            .recommendations()
            .map(|items| items.iter().map(RecommendationVm::from).collect())
            .unwrap_or_default();

        Self {
            categories,
            recommendations,
        }
    }
}

#[must_use]
pub fn map_result(result: &ScoredResult) -> ResultVm {
    ResultVm::from(result)
}
