pub mod grading;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod report_service;

pub use grading::GradingStrategy;
pub use quiz_attempt_service::{QuizAttemptService, SubmitResult};
pub use quiz_service::QuizService;
pub use report_service::generate_assessment_report;
