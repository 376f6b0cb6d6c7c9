use aptitude_core::model::{Career, CareerCatalog};

use crate::vm::labels::humanize_category;

const MAX_SKILLS_SHOWN: usize = 4;
const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CareerCardVm {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub growth: String,
    pub skills: Vec<String>,
}

impl From<&Career> for CareerCardVm {
    fn from(career: &Career) -> Self {
        Self {
            title: career.title.clone(),
            description: career.description.clone(),
            salary: career.salary.clone().unwrap_or_else(|| NOT_AVAILABLE.into()),
            growth: career.growth.clone().unwrap_or_else(|| NOT_AVAILABLE.into()),
            skills: career.skills.iter().take(MAX_SKILLS_SHOWN).cloned().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CareerCategoryVm {
    pub label: String,
    pub careers: Vec<CareerCardVm>,
}

#[must_use]
pub fn map_career_catalog(catalog: &CareerCatalog) -> Vec<CareerCategoryVm> {
    catalog
        .categories()
        .map(|(name, careers)| CareerCategoryVm {
            label: humanize_category(name),
            careers: careers.iter().map(CareerCardVm::from).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn fills_missing_fields_and_caps_skills() {
        let mut categories = IndexMap::new();
        categories.insert(
            "health_care".to_string(),
            vec![Career {
                title: "Nurse".into(),
                description: "Cares for patients".into(),
                skills: ["Empathy", "Triage", "Charting", "Pharmacology", "Stamina"]
                    .iter()
                    .map(|s| (*s).to_string())
                    .collect(),
                salary: None,
                growth: Some("Fast".into()),
            }],
        );

        let vm = map_career_catalog(&CareerCatalog::new(categories));

        assert_eq!(vm[0].label, "Health Care");
        let card = &vm[0].careers[0];
        assert_eq!(card.salary, "N/A");
        assert_eq!(card.growth, "Fast");
        assert_eq!(card.skills.len(), 4);
        assert_eq!(card.skills[3], "Pharmacology");
    }
}
