use aptitude_core::{AssessmentSession, SessionState};
use services::{AssessmentProgress, CatalogService, SourceStatus};

use crate::views::ViewError;
use crate::vm::result_vm::{ResultVm, map_result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    Finish,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// One question on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub counter: String,
    pub progress: f64,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub action: PrimaryAction,
    pub action_enabled: bool,
    /// Set after a failed submission; the finish action doubles as retry.
    pub failure: Option<String>,
}

impl QuestionVm {
    #[must_use]
    pub fn from_session(session: &AssessmentSession) -> Option<Self> {
        let question = session.current_question()?;
        let progress = AssessmentProgress::of(session);
        let selected = session.current_answer();
        let (action, action_enabled) = if session.is_last_question() {
            (PrimaryAction::Finish, session.can_finish())
        } else {
            (PrimaryAction::Next, session.can_advance())
        };

        Some(Self {
            counter: format!("{}/{}", progress.position, progress.total),
            progress: progress.fraction,
            prompt: question.text().to_string(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(index, label)| OptionVm {
                    index,
                    label: label.clone(),
                    selected: selected == Some(index),
                })
                .collect(),
            action,
            action_enabled,
            failure: session.failure().map(|failure| failure.message().to_string()),
        })
    }
}

/// Everything the assessment screen can show.
#[derive(Clone, Debug, PartialEq)]
pub enum AssessmentPage {
    Loading,
    Blocked(ViewError),
    Question(QuestionVm),
    Submitting,
    Results(ResultVm),
}

/// Pick the assessment screen for the current catalog and session.
///
/// Never shows a question unless the question catalog loaded.
#[must_use]
pub fn assessment_page(
    catalogs: &CatalogService,
    session: Option<&AssessmentSession>,
) -> AssessmentPage {
    match catalogs.questions() {
        SourceStatus::Loading => return AssessmentPage::Loading,
        SourceStatus::Error(_) => return AssessmentPage::Blocked(ViewError::QuestionsUnavailable),
        SourceStatus::Ready(_) => {}
    }

    let Some(session) = session else {
        return AssessmentPage::Loading;
    };

    match session.state() {
        SessionState::Submitting => AssessmentPage::Submitting,
        SessionState::Completed(result) => AssessmentPage::Results(map_result(result)),
        SessionState::InProgress { .. } | SessionState::SubmitFailed(_) => {
            QuestionVm::from_session(session)
                .map_or(AssessmentPage::Loading, AssessmentPage::Question)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use aptitude_core::model::{Question, UserId};
    use aptitude_core::time::fixed_clock;
    use aptitude_core::SubmissionFailure;
    use gateway::InMemoryGateway;
    use services::AssessmentService;

    fn questions() -> Vec<Question> {
        (0..2_i64)
            .map(|id| Question::new(id, format!("Q{id}"), vec!["yes".into(), "no".into()], "verbal"))
            .collect()
    }

    async fn loaded(backend: &InMemoryGateway) -> (CatalogService, AssessmentService) {
        let mut catalogs = CatalogService::new(Arc::new(backend.clone()));
        catalogs.load().await;
        let service = AssessmentService::new(fixed_clock(), Arc::new(backend.clone()), UserId::new(1));
        (catalogs, service)
    }

    #[tokio::test]
    async fn blocked_when_questions_fail() {
        let backend = InMemoryGateway::demo();
        backend.fail_questions("offline");
        let (catalogs, _) = loaded(&backend).await;

        let page = assessment_page(&catalogs, None);
        assert_eq!(page, AssessmentPage::Blocked(ViewError::QuestionsUnavailable));
    }

    #[tokio::test]
    async fn question_page_tracks_selection_and_action() {
        let backend = InMemoryGateway::new().with_questions(questions());
        let (catalogs, service) = loaded(&backend).await;
        let mut session = service.start(&catalogs).unwrap();

        let AssessmentPage::Question(vm) = assessment_page(&catalogs, Some(&session)) else {
            panic!("expected question page");
        };
        assert_eq!(vm.counter, "1/2");
        assert_eq!(vm.action, PrimaryAction::Next);
        assert!(!vm.action_enabled);
        assert!(vm.options.iter().all(|option| !option.selected));

        service.select_answer(&mut session, 1);
        service.advance(&mut session);
        service.select_answer(&mut session, 0);

        let vm = QuestionVm::from_session(&session).unwrap();
        assert_eq!(vm.counter, "2/2");
        assert!((vm.progress - 1.0).abs() < f64::EPSILON);
        assert_eq!(vm.action, PrimaryAction::Finish);
        assert!(vm.action_enabled);
        assert!(vm.options[0].selected);
    }

    #[tokio::test]
    async fn failure_is_shown_on_the_last_question() {
        let backend = InMemoryGateway::new().with_questions(questions());
        let (catalogs, service) = loaded(&backend).await;
        let mut session = service.start(&catalogs).unwrap();
        service.select_answer(&mut session, 0);
        service.advance(&mut session);
        service.select_answer(&mut session, 1);
        let ticket = session.begin_submission(UserId::new(1)).unwrap();
        assert_eq!(assessment_page(&catalogs, Some(&session)), AssessmentPage::Submitting);

        session
            .complete_submission(ticket.generation(), Err(SubmissionFailure::new("timeout")))
            .unwrap();

        let AssessmentPage::Question(vm) = assessment_page(&catalogs, Some(&session)) else {
            panic!("expected question page");
        };
        assert_eq!(vm.failure.as_deref(), Some("timeout"));
        assert!(vm.action_enabled);
    }

    #[tokio::test]
    async fn completed_session_shows_results() {
        let backend = InMemoryGateway::demo();
        let (catalogs, service) = loaded(&backend).await;
        let mut session = service.start(&catalogs).unwrap();
        loop {
            service.select_answer(&mut session, 2);
            if !service.advance(&mut session) {
                break;
            }
        }
        service.finish(&mut session).await;

        let AssessmentPage::Results(vm) = assessment_page(&catalogs, Some(&session)) else {
            panic!("expected results page");
        };
        assert!(vm.has_categories());
        assert!(vm.has_recommendations());
    }
}
