mod assessment_vm;
mod career_vm;
mod labels;
mod result_vm;

pub use assessment_vm::{AssessmentPage, OptionVm, PrimaryAction, QuestionVm, assessment_page};
pub use career_vm::{CareerCardVm, CareerCategoryVm, map_career_catalog};
pub use labels::{format_percentage, humanize_category};
pub use result_vm::{CategoryScoreVm, RecommendationVm, ResultVm, map_result};
