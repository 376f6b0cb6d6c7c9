pub mod views;
pub mod vm;

pub use views::{ViewError, ViewState, careers_view_state};
pub use vm::{AssessmentPage, assessment_page};
