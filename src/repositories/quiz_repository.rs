use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Quiz>>;
    /// All quizzes in catalog (creation) order.
    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Replaces the stored quiz. The stored `attempts` counter is kept; it
    /// only moves through `increment_attempts`.
    async fn update(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Bumps the attempts counter in place and returns the new count, or
    /// `None` when the quiz no longer exists.
    async fn increment_attempts(&self, id: &Uuid) -> AppResult<Option<u32>>;
    async fn clear(&self) -> AppResult<()>;
}

/// Process-local catalog. A `Vec` keeps the catalog order stable.
#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<Vec<Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| &q.id == id).cloned())
    }

    async fn list_quizzes(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.clone())
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.iter().any(|q| q.id == quiz.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz with id '{}' already exists",
                quiz.id
            )));
        }
        quizzes.push(quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let slot = quizzes
            .iter_mut()
            .find(|q| q.id == quiz.id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id)))?;
        let attempts = slot.attempts;
        *slot = quiz;
        slot.attempts = attempts;
        Ok(slot.clone())
    }

    async fn increment_attempts(&self, id: &Uuid) -> AppResult<Option<u32>> {
        let mut quizzes = self.quizzes.write().await;
        Ok(quizzes.iter_mut().find(|q| &q.id == id).map(|quiz| {
            quiz.record_attempt();
            quiz.attempts
        }))
    }

    async fn clear(&self) -> AppResult<()> {
        self.quizzes.write().await.clear();
        Ok(())
    }
}
