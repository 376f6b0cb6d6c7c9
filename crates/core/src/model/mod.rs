mod answers;
mod career;
mod ids;
mod question;
mod result;

pub use answers::AnswerMap;
pub use career::{Career, CareerCatalog};
pub use ids::{QuestionId, UserId};
pub use question::{Question, QuestionCatalog};
pub use result::{CategoryScore, Recommendation, ScoreBreakdown, ScoredResult};
