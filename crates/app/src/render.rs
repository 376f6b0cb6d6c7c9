use std::fmt;

use ui::vm::{CareerCategoryVm, PrimaryAction, QuestionVm, ResultVm};
use ui::{AssessmentPage, ViewState};

const BAR_WIDTH: usize = 30;

pub fn page(page: &AssessmentPage) -> String {
    match page {
        AssessmentPage::Loading => "Loading Test...\n".to_string(),
        AssessmentPage::Blocked(err) => format!("{}\n", err.message()),
        AssessmentPage::Question(vm) => QuestionView(vm).to_string(),
        AssessmentPage::Submitting => "Scoring your answers...\n".to_string(),
        AssessmentPage::Results(vm) => ResultsView(vm).to_string(),
    }
}

pub fn careers(state: &ViewState<Vec<CareerCategoryVm>>) -> String {
    match state {
        ViewState::Loading => "Loading careers...\n".to_string(),
        ViewState::Error(err) => format!("{}\n", err.message()),
        ViewState::Ready(categories) => CareersView(categories).to_string(),
    }
}

fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

struct QuestionView<'a>(&'a QuestionVm);

impl fmt::Display for QuestionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vm = self.0;
        writeln!(f, "\nAptitude Test  {}  {}", vm.counter, progress_bar(vm.progress))?;
        writeln!(f, "\n{}\n", vm.prompt)?;
        for option in &vm.options {
            let marker = if option.selected { '*' } else { ' ' };
            writeln!(f, " {marker} {}. {}", option.index + 1, option.label)?;
        }
        if let Some(failure) = &vm.failure {
            writeln!(f, "\nSubmission failed: {failure}")?;
        }

        let action = match vm.action {
            PrimaryAction::Next => "[n] Next",
            PrimaryAction::Finish if vm.failure.is_some() => "[f] Retry submission",
            PrimaryAction::Finish => "[f] Finish & See Results",
        };
        let state = if vm.action_enabled { "" } else { " (answer first)" };
        writeln!(
            f,
            "\n1-{} select  {action}{state}  [r] restart  [q] quit",
            vm.options.len()
        )
    }
}

struct ResultsView<'a>(&'a ResultVm);

impl fmt::Display for ResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vm = self.0;
        writeln!(f, "\nYour Career Recommendations\n")?;
        writeln!(f, "Aptitude Profile")?;
        if vm.has_categories() {
            for category in &vm.categories {
                writeln!(f, "  {:<24} {:>5}", category.label, category.percentage_str)?;
            }
        } else {
            writeln!(f, "  (no category scores)")?;
        }

        writeln!(f)?;
        if vm.has_recommendations() {
            for (rank, recommendation) in vm.recommendations.iter().enumerate() {
                writeln!(
                    f,
                    "{}. {}  {}",
                    rank + 1,
                    recommendation.title,
                    recommendation.match_str
                )?;
                if !recommendation.reasoning.is_empty() {
                    writeln!(f, "   {}", recommendation.reasoning)?;
                }
            }
        } else {
            writeln!(f, "(no recommendations)")?;
        }
        writeln!(f, "\n[r] Retake Test  [q] quit")
    }
}

struct CareersView<'a>(&'a [CareerCategoryVm]);

impl fmt::Display for CareersView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Career Explorer")?;
        for category in self.0 {
            writeln!(f, "\n== {} ==", category.label)?;
            for career in &category.careers {
                writeln!(f, "\n{}", career.title)?;
                if !career.description.is_empty() {
                    writeln!(f, "  {}", career.description)?;
                }
                writeln!(f, "  Salary: {}", career.salary)?;
                writeln!(f, "  Growth: {}", career.growth)?;
                if !career.skills.is_empty() {
                    writeln!(f, "  Skills: {}", career.skills.join(", "))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_is_bounded() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(1.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(2.0), progress_bar(1.0));
    }

    #[test]
    fn empty_results_render_placeholders() {
        let text = page(&AssessmentPage::Results(ResultVm::default()));
        assert!(text.contains("(no category scores)"));
        assert!(text.contains("(no recommendations)"));
    }

    #[test]
    fn careers_list_every_category() {
        let categories = vec![CareerCategoryVm {
            label: "Technology".into(),
            careers: Vec::new(),
        }];
        let text = careers(&ViewState::Ready(categories));
        assert!(text.starts_with("Career Explorer\n"));
        assert!(text.contains("== Technology =="));
    }
}
