use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::AttemptRecord,
};

/// Append-only attempt history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    async fn create(&self, attempt: AttemptRecord) -> AppResult<AttemptRecord>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<AttemptRecord>>;
    async fn find_by_student(
        &self,
        student_id: &str,
        quiz_id: Option<Uuid>,
    ) -> AppResult<Vec<AttemptRecord>>;
    async fn find_by_quiz(&self, quiz_id: &Uuid) -> AppResult<Vec<AttemptRecord>>;
    async fn clear(&self) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryQuizAttemptRepository {
    attempts: RwLock<Vec<AttemptRecord>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: AttemptRecord) -> AppResult<AttemptRecord> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<AttemptRecord>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_by_student(
        &self,
        student_id: &str,
        quiz_id: Option<Uuid>,
    ) -> AppResult<Vec<AttemptRecord>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.student_id == student_id)
            .filter(|a| quiz_id.map_or(true, |id| a.quiz_id == id))
            .cloned()
            .collect())
    }

    async fn find_by_quiz(&self, quiz_id: &Uuid) -> AppResult<Vec<AttemptRecord>> {
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| &a.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn clear(&self) -> AppResult<()> {
        self.attempts.write().await.clear();
        Ok(())
    }
}
