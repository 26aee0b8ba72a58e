pub mod assessment;
pub mod attempt_record;
pub mod attempt_session;
pub mod quiz;
pub mod quiz_draft;
pub mod quiz_question;
pub mod user;
pub use assessment::{PerformanceBand, TimeEfficiency};
pub use attempt_record::{AttemptRecord, QuestionResult};
pub use attempt_session::{AttemptSession, SubmitOutcome};
pub use quiz::Quiz;
pub use quiz_draft::QuizDraft;
pub use quiz_question::{QuestionDraft, QuizQuestion, QuizQuestionType};
pub use user::{Identity, UserRole};
