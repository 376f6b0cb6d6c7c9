mod progress;
mod workflow;

pub use progress::AssessmentProgress;
pub use workflow::AssessmentService;
