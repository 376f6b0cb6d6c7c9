use aptitude_core::AssessmentSession;

/// Aggregated view of assessment progress, useful for UI.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    /// `position / total`, for a progress bar.
    pub fraction: f64,
}

impl AssessmentProgress {
    #[must_use]
    pub fn of(session: &AssessmentSession) -> Self {
        let total = session.question_count();
        let position = session.current_index() + 1;
        let fraction = if total == 0 {
            0.0
        } else {
            position as f64 / total as f64
        };
        Self {
            position,
            total,
            answered: session.answers().len(),
            fraction,
        }
    }
}
