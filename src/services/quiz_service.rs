use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::require_author,
    errors::{AppError, AppResult},
    models::{
        domain::{Identity, QuestionDraft, Quiz, QuizDraft},
        dto::{request::CreateQuizRequest, response::QuizForTaking},
    },
    repositories::{QuizRepository, SessionRepository},
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            sessions,
        }
    }

    async fn find_quiz(&self, id: &Uuid) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    /// Full quiz including correct answers; authors only.
    pub async fn get_quiz(&self, actor: &Identity, id: &Uuid) -> AppResult<Quiz> {
        require_author(actor)?;
        self.find_quiz(id).await
    }

    /// Quiz as presented to someone taking it. Unpublished quizzes look
    /// missing to learners.
    pub async fn get_quiz_for_taking(&self, actor: &Identity, id: &Uuid) -> AppResult<QuizForTaking> {
        let quiz = self.find_quiz(id).await?;
        if !quiz.is_visible_to(actor) {
            log::debug!("Quiz '{}' hidden from {}", id, actor.id);
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }
        Ok(QuizForTaking::from(&quiz))
    }

    pub async fn list_quizzes(&self, actor: &Identity) -> AppResult<Vec<Quiz>> {
        let quizzes = self.repository.list_quizzes().await?;
        Ok(quizzes
            .into_iter()
            .filter(|q| q.is_visible_to(actor))
            .collect())
    }

    pub async fn create_quiz(&self, actor: &Identity, request: CreateQuizRequest) -> AppResult<Quiz> {
        require_author(actor)?;
        request.validate()?;

        let mut quiz = Quiz::new(
            &request.title,
            &request.description,
            &request.course_id,
            &request.course_name,
            request.time_limit,
            &actor.id,
        );
        for input in &request.questions {
            quiz.append_question(&QuestionDraft::from(input))?;
        }

        let quiz = self.repository.create(quiz).await?;
        log::info!(
            "Quiz '{}' ({}) created by {} with {} questions",
            quiz.title,
            quiz.id,
            actor.id,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    pub async fn create_quiz_from_draft(&self, actor: &Identity, draft: QuizDraft) -> AppResult<Quiz> {
        self.create_quiz(actor, draft.into_request()).await
    }

    pub async fn add_question(
        &self,
        actor: &Identity,
        quiz_id: &Uuid,
        draft: &QuestionDraft,
    ) -> AppResult<Quiz> {
        require_author(actor)?;
        let mut quiz = self.find_quiz(quiz_id).await?;

        let question_id = quiz.append_question(draft)?.id;
        let quiz = self.repository.update(quiz).await?;

        log::info!(
            "Question {} added to quiz '{}', total points now {}",
            question_id,
            quiz.id,
            quiz.total_points
        );
        Ok(quiz)
    }

    /// Removes a question and discards every session still running against
    /// the old question list.
    pub async fn remove_question(
        &self,
        actor: &Identity,
        quiz_id: &Uuid,
        question_id: u32,
    ) -> AppResult<Quiz> {
        require_author(actor)?;
        let mut quiz = self.find_quiz(quiz_id).await?;

        quiz.remove_question(question_id)?;
        let quiz = self.repository.update(quiz).await?;

        let discarded = self.sessions.remove_by_quiz(quiz_id).await?;
        if discarded > 0 {
            log::warn!(
                "Discarded {} in-progress session(s) of quiz '{}' after question {} was removed",
                discarded,
                quiz_id,
                question_id
            );
        }

        log::info!("Question {} removed from quiz '{}'", question_id, quiz_id);
        Ok(quiz)
    }

    pub async fn toggle_publish(&self, actor: &Identity, quiz_id: &Uuid) -> AppResult<Quiz> {
        require_author(actor)?;
        let mut quiz = self.find_quiz(quiz_id).await?;

        let published = quiz.toggle_publish();
        let quiz = self.repository.update(quiz).await?;

        log::info!(
            "Quiz '{}' {}",
            quiz_id,
            if published { "published" } else { "unpublished" }
        );
        Ok(quiz)
    }

    pub async fn reset(&self) -> AppResult<()> {
        self.repository.clear().await
    }
}
