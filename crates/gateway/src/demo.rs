//! Built-in catalog and scorer used when no backend is reachable.
//!
//! Each option index counts as `index + 1` points out of the question's
//! option count. That is enough to exercise the full flow; it is not a
//! psychometric model.

use aptitude_core::SubmissionPayload;
use aptitude_core::model::{
    Career, CareerCatalog, CategoryScore, Question, QuestionCatalog, Recommendation, ScoredResult,
};
use indexmap::IndexMap;

const MAX_RECOMMENDATIONS: usize = 3;

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

#[must_use]
pub fn questions() -> Vec<Question> {
    vec![
        Question::new(
            1_i64,
            "How comfortable are you solving multi-step logic puzzles?",
            options(&["Not at all", "Somewhat", "Comfortable", "Very comfortable"]),
            "logical_reasoning",
        ),
        Question::new(
            2_i64,
            "How often do you work with numbers or spreadsheets?",
            options(&["Never", "Rarely", "Weekly", "Daily"]),
            "numerical",
        ),
        Question::new(
            3_i64,
            "How much do you enjoy writing or presenting ideas?",
            options(&["Not at all", "A little", "Quite a bit", "A lot"]),
            "verbal",
        ),
        Question::new(
            4_i64,
            "How often do you sketch, design or make things by hand?",
            options(&["Never", "Rarely", "Sometimes", "Often"]),
            "creative",
        ),
        Question::new(
            5_i64,
            "How confident are you spotting patterns in data?",
            options(&["Not confident", "Slightly", "Fairly", "Very"]),
            "numerical",
        ),
        Question::new(
            6_i64,
            "Do you like taking the lead in group work?",
            options(&["Avoid it", "If asked", "Usually", "Always"]),
            "interpersonal",
        ),
    ]
}

fn career(title: &str, description: &str, skills: &[&str], salary: Option<&str>, growth: Option<&str>) -> Career {
    Career {
        title: title.to_string(),
        description: description.to_string(),
        skills: options(skills),
        salary: salary.map(str::to_string),
        growth: growth.map(str::to_string),
    }
}

#[must_use]
pub fn careers() -> CareerCatalog {
    let mut categories = IndexMap::new();
    categories.insert(
        "technology".to_string(),
        vec![
            career(
                "Software Engineer",
                "Designs and builds software systems.",
                &["Programming", "Problem solving", "Testing", "System design", "Git"],
                Some("$90k - $150k"),
                Some("High"),
            ),
            career(
                "Data Analyst",
                "Turns raw data into decisions.",
                &["SQL", "Statistics", "Visualization"],
                Some("$65k - $100k"),
                None,
            ),
        ],
    );
    categories.insert(
        "communication".to_string(),
        vec![career(
            "Technical Writer",
            "Explains complex products in plain language.",
            &["Writing", "Editing", "Research"],
            None,
            Some("Moderate"),
        )],
    );
    categories.insert(
        "creative".to_string(),
        vec![career(
            "UX Designer",
            "Shapes how people experience products.",
            &["Prototyping", "User research", "Visual design"],
            Some("$75k - $120k"),
            Some("High"),
        )],
    );
    CareerCatalog::new(categories)
}

fn careers_for(category: &str) -> &'static [(&'static str, &'static str)] {
    match category {
        "logical_reasoning" => &[
            ("Software Engineer", "Strong logical reasoning suits system design."),
            ("Operations Research Analyst", "Structured problem solving at scale."),
        ],
        "numerical" => &[
            ("Data Analyst", "Comfort with numbers and patterns."),
            ("Actuary", "Quantitative risk assessment."),
        ],
        "verbal" => &[("Technical Writer", "Clear written and spoken communication.")],
        "creative" => &[("UX Designer", "Hands-on creative and design work.")],
        "interpersonal" => &[("Product Manager", "Leads people toward shared goals.")],
        _ => &[],
    }
}

/// Score a payload against the built-in question set.
///
/// Categories appear in catalog order; recommendations are ranked by the
/// score of the category they come from.
#[must_use]
pub fn score(catalog: &QuestionCatalog, payload: &SubmissionPayload) -> ScoredResult {
    let mut totals: IndexMap<String, (usize, usize)> = IndexMap::new();
    for question in catalog.iter() {
        totals.entry(question.category().to_string()).or_insert((0, 0));
    }

    for entry in &payload.answers {
        let Some(question) = catalog
            .position_of(&entry.question_id)
            .and_then(|index| catalog.get(index))
        else {
            continue;
        };
        let slot = totals
            .entry(question.category().to_string())
            .or_insert((0, 0));
        slot.0 += entry.user_answer.min(question.option_count() - 1) + 1;
        slot.1 += question.option_count();
    }

    let scores: IndexMap<String, CategoryScore> = totals
        .into_iter()
        .map(|(category, (earned, possible))| {
            let percentage = if possible == 0 {
                0.0
            } else {
                earned as f64 * 100.0 / possible as f64
            };
            (category, CategoryScore::new(percentage))
        })
        .collect();

    let mut recommendations: Vec<Recommendation> = scores
        .iter()
        .flat_map(|(category, score)| {
            careers_for(category)
                .iter()
                .map(move |(title, reasoning)| Recommendation {
                    career_title: (*title).to_string(),
                    reasoning: (*reasoning).to_string(),
                    match_percentage: score.percentage,
                })
        })
        .collect();
    recommendations.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    recommendations.truncate(MAX_RECOMMENDATIONS);

    ScoredResult::new(scores, recommendations)
}
