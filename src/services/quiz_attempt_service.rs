use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    auth::{require_author, require_owner_or_author},
    errors::{AppError, AppResult},
    models::{
        domain::{
            AttemptRecord, AttemptSession, Identity, QuestionResult, QuizQuestion, SubmitOutcome,
        },
        dto::response::{AssessmentReport, QuizStatistics},
    },
    repositories::{QuizAttemptRepository, QuizRepository, SessionRepository},
    services::{
        grading::{GradingStrategy, Verdict},
        report_service::{compute_quiz_statistics, generate_assessment_report},
    },
};

/// What a submitted answer led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    InProgress(AttemptSession),
    Completed(AttemptRecord),
}

pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    sessions: Arc<dyn SessionRepository>,
    grading: GradingStrategy,
}

impl QuizAttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        sessions: Arc<dyn SessionRepository>,
        grading: GradingStrategy,
    ) -> Self {
        Self {
            quizzes,
            attempts,
            sessions,
            grading,
        }
    }

    /// Starts a fresh session, replacing whatever session the learner had.
    pub async fn start_quiz(&self, actor: &Identity, quiz_id: &Uuid) -> AppResult<AttemptSession> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .filter(|q| q.is_visible_to(actor))
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let session = AttemptSession::start(&quiz, actor, Utc::now())?;

        if let Some(previous) = self.sessions.find_by_student(&actor.id).await? {
            log::debug!(
                "Replacing session of {} on quiz '{}'",
                actor.id,
                previous.quiz_id
            );
        }

        let session = self.sessions.save(session).await?;
        log::info!("{} started quiz '{}'", actor.id, quiz_id);
        Ok(session)
    }

    pub async fn active_session(&self, actor: &Identity) -> AppResult<Option<AttemptSession>> {
        self.sessions.find_by_student(&actor.id).await
    }

    async fn require_session(&self, actor: &Identity) -> AppResult<AttemptSession> {
        self.sessions
            .find_by_student(&actor.id)
            .await?
            .ok_or_else(|| AppError::InvalidState("No quiz in progress".to_string()))
    }

    pub async fn select_answer(&self, actor: &Identity, answer: &str) -> AppResult<AttemptSession> {
        let mut session = self.require_session(actor).await?;
        session.select_answer(answer);
        self.sessions.save(session).await
    }

    /// Submits `answer`, or the pending selection when `answer` is `None`.
    /// The last answer finalizes the attempt.
    pub async fn submit_answer(
        &self,
        actor: &Identity,
        answer: Option<&str>,
    ) -> AppResult<SubmitResult> {
        let mut session = self.require_session(actor).await?;

        let outcome = match answer {
            Some(answer) => session.submit(answer),
            None => session.submit_selected(),
        }
        .map_err(|e| {
            log::debug!("Rejected answer from {}: {}", actor.id, e);
            e
        })?;

        match outcome {
            SubmitOutcome::Advanced { .. } => {
                let session = self.sessions.save(session).await?;
                Ok(SubmitResult::InProgress(session))
            }
            SubmitOutcome::Completed => {
                let record = self.finalize(session).await?;
                Ok(SubmitResult::Completed(record))
            }
        }
    }

    async fn finalize(&self, session: AttemptSession) -> AppResult<AttemptRecord> {
        let completed_at = Utc::now();
        let (score, results) =
            Self::grade_attempt(&session.questions, &session.answers, self.grading);
        let record = Self::create_attempt(&session, score, results, completed_at)?;

        let record = self.attempts.create(record).await?;
        self.sessions.remove(&session.student_id).await?;

        if self.quizzes.increment_attempts(&session.quiz_id).await?.is_none() {
            log::warn!(
                "Quiz '{}' vanished before attempt {} was counted",
                session.quiz_id,
                record.id
            );
        }

        log::info!(
            "{} completed quiz '{}' with {}/{}",
            record.student_id,
            record.quiz_id,
            record.score,
            record.total_points
        );
        Ok(record)
    }

    /// Discards the learner's session without recording anything. Returns
    /// whether there was a session to discard.
    pub async fn exit_quiz(&self, actor: &Identity) -> AppResult<bool> {
        let removed = self.sessions.remove(&actor.id).await?;
        if let Some(session) = &removed {
            log::info!("{} exited quiz '{}'", actor.id, session.quiz_id);
        }
        Ok(removed.is_some())
    }

    /// Grades answers against questions by 1-based position.
    pub fn grade_attempt(
        questions: &[QuizQuestion],
        answers: &BTreeMap<u32, String>,
        strategy: GradingStrategy,
    ) -> (u32, Vec<QuestionResult>) {
        let mut score: u32 = 0;
        let mut results = Vec::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            let question_number = index as u32 + 1;
            let answer = answers.get(&question_number);
            let verdict = strategy.evaluate(question, answer.map(String::as_str));

            let points_earned = if verdict == Verdict::Correct {
                question.points
            } else {
                0
            };
            // bounded by the snapshot total, which create_attempt checks
            score = score.saturating_add(points_earned);

            results.push(QuestionResult {
                question_number,
                question_id: question.id,
                answer: answer.cloned(),
                is_correct: verdict == Verdict::Correct,
                points_earned,
                points_possible: question.points,
                pending_review: verdict == Verdict::PendingReview,
            });
        }

        (score, results)
    }

    pub fn create_attempt(
        session: &AttemptSession,
        score: u32,
        question_results: Vec<QuestionResult>,
        completed_at: DateTime<Utc>,
    ) -> AppResult<AttemptRecord> {
        Ok(AttemptRecord {
            id: Uuid::new_v4(),
            quiz_id: session.quiz_id,
            quiz_title: session.quiz_title.clone(),
            student_id: session.student_id.clone(),
            student_name: session.student_name.clone(),
            answers: session.answers.clone(),
            question_results,
            score,
            total_points: session.total_points()?,
            started_at: session.started_at,
            completed_at,
            time_spent: session.time_spent_minutes(completed_at),
        })
    }

    pub async fn my_attempts(
        &self,
        actor: &Identity,
        quiz_id: Option<Uuid>,
    ) -> AppResult<Vec<AttemptRecord>> {
        self.attempts.find_by_student(&actor.id, quiz_id).await
    }

    pub async fn get_attempt(&self, actor: &Identity, id: &Uuid) -> AppResult<AttemptRecord> {
        let attempt = self
            .attempts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))?;

        require_owner_or_author(actor, &attempt.student_id)?;
        Ok(attempt)
    }

    pub async fn quiz_attempts(&self, actor: &Identity, quiz_id: &Uuid) -> AppResult<Vec<AttemptRecord>> {
        require_author(actor)?;
        if self.quizzes.find_by_id(quiz_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                quiz_id
            )));
        }
        self.attempts.find_by_quiz(quiz_id).await
    }

    pub async fn quiz_statistics(&self, actor: &Identity, quiz_id: &Uuid) -> AppResult<QuizStatistics> {
        let records = self.quiz_attempts(actor, quiz_id).await?;
        Ok(compute_quiz_statistics(*quiz_id, &records))
    }

    pub async fn assessment_report(
        &self,
        actor: &Identity,
        attempt_id: &Uuid,
    ) -> AppResult<AssessmentReport> {
        let attempt = self.get_attempt(actor, attempt_id).await?;
        Ok(generate_assessment_report(&attempt))
    }

    pub async fn reset(&self) -> AppResult<()> {
        self.sessions.clear().await?;
        self.attempts.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{QuestionDraft, Quiz, UserRole},
        repositories::{
            quiz_attempt_repository::MockQuizAttemptRepository,
            quiz_repository::MockQuizRepository, session_repository::MockSessionRepository,
        },
    };

    fn learner() -> Identity {
        Identity::new("s-1", "Sam", UserRole::Student)
    }

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuestionDraft::multiple_choice("Heap pointer?", &["Box", "Cell"], "Box", 10)
                .build(1)
                .unwrap(),
            QuestionDraft::short_answer("Keyword for trait objects?", "dyn", 5)
                .build(2)
                .unwrap(),
        ]
    }

    fn answers(pairs: &[(u32, &str)]) -> BTreeMap<u32, String> {
        pairs
            .iter()
            .map(|(number, answer)| (*number, answer.to_string()))
            .collect()
    }

    fn published_quiz() -> Quiz {
        let mut quiz = Quiz::new("Pointers", "Box and friends", "c", "Course", 10, "t-1");
        for question in questions() {
            quiz.append_question(&QuestionDraft::from(&question)).unwrap();
        }
        quiz.is_published = true;
        quiz
    }

    #[test]
    fn test_grade_attempt_scores_exact_matches() {
        let (score, results) = QuizAttemptService::grade_attempt(
            &questions(),
            &answers(&[(1, "Box"), (2, "dyn")]),
            GradingStrategy::Exact,
        );

        assert_eq!(score, 15);
        assert!(results.iter().all(|r| r.is_correct));
    }

    #[test]
    fn test_grade_attempt_is_case_sensitive_by_default() {
        let (score, results) = QuizAttemptService::grade_attempt(
            &questions(),
            &answers(&[(1, "Box"), (2, "DYN")]),
            GradingStrategy::Exact,
        );

        assert_eq!(score, 10);
        assert!(!results[1].is_correct);
        assert_eq!(results[1].points_earned, 0);
    }

    #[test]
    fn test_grade_attempt_treats_missing_answers_as_wrong() {
        let (score, results) =
            QuizAttemptService::grade_attempt(&questions(), &BTreeMap::new(), GradingStrategy::Exact);

        assert_eq!(score, 0);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].answer, None);
    }

    #[test]
    fn test_grade_attempt_flags_manual_review() {
        let (score, results) = QuizAttemptService::grade_attempt(
            &questions(),
            &answers(&[(1, "Box"), (2, "dyn")]),
            GradingStrategy::ManualReview,
        );

        assert_eq!(score, 10);
        assert!(results[1].pending_review);
        assert!(!results[0].pending_review);
    }

    #[tokio::test]
    async fn test_submit_without_session_is_invalid_state() {
        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_student().returning(|_| Ok(None));
        sessions.expect_save().never();

        let service = QuizAttemptService::new(
            Arc::new(MockQuizRepository::new()),
            Arc::new(MockQuizAttemptRepository::new()),
            Arc::new(sessions),
            GradingStrategy::Exact,
        );

        let result = service.submit_answer(&learner(), Some("Box")).await;
        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_final_answer_records_attempt_and_counts_it() {
        let quiz = published_quiz();
        let mut session = AttemptSession::start(&quiz, &learner(), Utc::now()).unwrap();
        session.submit("Box").unwrap();

        let quiz_id = quiz.id;
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().never();
        quizzes.expect_update().never();
        quizzes
            .expect_increment_attempts()
            .with(mockall::predicate::eq(quiz_id))
            .times(1)
            .returning(|_| Ok(Some(1)));

        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_create().times(1).returning(|record| Ok(record));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_student()
            .returning(move |_| Ok(Some(session.clone())));
        sessions.expect_save().never();
        sessions.expect_remove().times(1).returning(|_| Ok(None));

        let service = QuizAttemptService::new(
            Arc::new(quizzes),
            Arc::new(attempts),
            Arc::new(sessions),
            GradingStrategy::Exact,
        );

        match service.submit_answer(&learner(), Some("dyn")).await.unwrap() {
            SubmitResult::Completed(record) => {
                assert_eq!(record.score, 15);
                assert_eq!(record.total_points, 15);
                assert_eq!(record.student_name, "Sam");
                assert_eq!(record.time_spent, 0);
            }
            other => panic!("Expected completed attempt, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_learners_cannot_read_an_attempt() {
        let quiz = published_quiz();
        let session = AttemptSession::start(&quiz, &learner(), Utc::now()).unwrap();
        let record = QuizAttemptService::create_attempt(&session, 0, Vec::new(), Utc::now()).unwrap();
        let record_id = record.id;

        let mut attempts = MockQuizAttemptRepository::new();
        attempts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(record.clone())));

        let service = QuizAttemptService::new(
            Arc::new(MockQuizRepository::new()),
            Arc::new(attempts),
            Arc::new(MockSessionRepository::new()),
            GradingStrategy::Exact,
        );

        let other = Identity::new("s-2", "Kim", UserRole::Student);
        assert!(matches!(
            service.get_attempt(&other, &record_id).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(service.get_attempt(&learner(), &record_id).await.is_ok());
    }
}
