pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod session_repository;

pub use quiz_attempt_repository::{InMemoryQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{InMemoryQuizRepository, QuizRepository};
pub use session_repository::{InMemorySessionRepository, SessionRepository};
