use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        quiz::Quiz,
        quiz_question::{sum_points, QuizQuestion},
        user::Identity,
    },
};

/// One learner's in-progress run through a quiz.
///
/// The question list is copied when the session starts, so later edits to the
/// quiz never shift what the learner is answering or how it is graded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptSession {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub student_id: String,
    pub student_name: String,
    pub questions: Vec<QuizQuestion>,
    pub current_question_index: usize,
    pub answers: BTreeMap<u32, String>, // keyed by 1-based question position
    pub selected_answer: Option<String>,
    pub started_at: DateTime<Utc>,
    pub time_remaining: u32, // seconds, fixed at start
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced { question_index: usize },
    Completed,
}

impl AttemptSession {
    pub fn start(quiz: &Quiz, learner: &Identity, now: DateTime<Utc>) -> AppResult<Self> {
        if quiz.questions.is_empty() {
            return Err(AppError::InvalidState(format!(
                "Quiz '{}' has no questions",
                quiz.title
            )));
        }
        let time_remaining = quiz.time_limit.checked_mul(60).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Time limit of quiz '{}' is out of range",
                quiz.title
            ))
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            quiz_id: quiz.id,
            quiz_title: quiz.title.clone(),
            student_id: learner.id.clone(),
            student_name: learner.name.clone(),
            questions: quiz.questions.clone(),
            current_question_index: 0,
            answers: BTreeMap::new(),
            selected_answer: None,
            started_at: now,
            time_remaining,
        })
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_question_index]
    }

    /// 1-based position of the current question.
    pub fn question_number(&self) -> u32 {
        self.current_question_index as u32 + 1
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 == self.questions.len()
    }

    pub fn total_points(&self) -> AppResult<u32> {
        sum_points(&self.questions)
    }

    pub fn select_answer(&mut self, answer: &str) {
        self.selected_answer = if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        };
    }

    /// Records `answer` for the current question and moves on.
    ///
    /// Returns `Completed` once the last question has been answered; the
    /// session is then ready to be finalized and must not be submitted again.
    pub fn submit(&mut self, answer: &str) -> AppResult<SubmitOutcome> {
        if answer.is_empty() {
            return Err(AppError::ValidationError(
                "An answer must be selected before submitting".to_string(),
            ));
        }

        self.answers.insert(self.question_number(), answer.to_string());
        self.selected_answer = None;

        if self.is_last_question() {
            return Ok(SubmitOutcome::Completed);
        }

        self.current_question_index += 1;
        Ok(SubmitOutcome::Advanced {
            question_index: self.current_question_index,
        })
    }

    /// Submits whatever answer is currently selected.
    pub fn submit_selected(&mut self) -> AppResult<SubmitOutcome> {
        let answer = self.selected_answer.clone().ok_or_else(|| {
            AppError::ValidationError("An answer must be selected before submitting".to_string())
        })?;
        self.submit(&answer)
    }

    /// Whole minutes between start and `completed_at`, never negative.
    pub fn time_spent_minutes(&self, completed_at: DateTime<Utc>) -> u32 {
        (completed_at - self.started_at).num_minutes().max(0) as u32
    }

    /// Seconds left against the time limit at `now`. Informational only:
    /// nothing is enforced when it reaches zero.
    pub fn time_remaining_at(&self, now: DateTime<Utc>) -> u32 {
        let elapsed = (now - self.started_at).num_seconds().max(0);
        (i64::from(self.time_remaining) - elapsed).max(0) as u32
    }
}
