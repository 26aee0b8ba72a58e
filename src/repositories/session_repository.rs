use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::AttemptSession};

/// At most one in-progress session per learner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<AttemptSession>>;
    /// Stores `session`, replacing any session the learner already had.
    async fn save(&self, session: AttemptSession) -> AppResult<AttemptSession>;
    async fn remove(&self, student_id: &str) -> AppResult<Option<AttemptSession>>;
    /// Drops every session running against `quiz_id` and returns how many.
    async fn remove_by_quiz(&self, quiz_id: &Uuid) -> AppResult<usize>;
    async fn clear(&self) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, AttemptSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_student(&self, student_id: &str) -> AppResult<Option<AttemptSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(student_id).cloned())
    }

    async fn save(&self, session: AttemptSession) -> AppResult<AttemptSession> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.student_id.clone(), session.clone());
        Ok(session)
    }

    async fn remove(&self, student_id: &str) -> AppResult<Option<AttemptSession>> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(student_id))
    }

    async fn remove_by_quiz(&self, quiz_id: &Uuid) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| &s.quiz_id != quiz_id);
        Ok(before - sessions.len())
    }

    async fn clear(&self) -> AppResult<()> {
        self.sessions.write().await.clear();
        Ok(())
    }
}
