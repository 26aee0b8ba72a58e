use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    AttemptRecord, AttemptSession, PerformanceBand, QuestionResult, Quiz, QuizQuestion,
    QuizQuestionType, TimeEfficiency,
};

/// Catalog entry without the question bank.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub course_name: String,
    pub question_count: u32,
    pub total_points: u32,
    pub time_limit: u32,
    pub attempts: u32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        QuizSummary {
            id: quiz.id,
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            course_id: quiz.course_id.clone(),
            course_name: quiz.course_name.clone(),
            question_count: quiz.questions.len() as u32,
            total_points: quiz.total_points,
            time_limit: quiz.time_limit,
            attempts: quiz.attempts,
            is_published: quiz.is_published,
            created_at: quiz.created_at,
        }
    }
}

/// A question as shown to a learner: no correct answer.
#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct QuestionForTaking {
    pub id: u32,
    pub number: u32,
    pub text: String,
    pub question_type: QuizQuestionType,
    pub options: Vec<String>,
    pub points: u32,
}

impl QuestionForTaking {
    pub fn new(question: &QuizQuestion, number: u32) -> Self {
        QuestionForTaking {
            id: question.id,
            number,
            text: question.text.clone(),
            question_type: question.question_type,
            options: question.options.clone(),
            points: question.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizForTaking {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub course_name: String,
    pub time_limit: u32,
    pub total_points: u32,
    pub questions: Vec<QuestionForTaking>,
}

impl From<&Quiz> for QuizForTaking {
    fn from(quiz: &Quiz) -> Self {
        QuizForTaking {
            id: quiz.id,
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            course_name: quiz.course_name.clone(),
            time_limit: quiz.time_limit,
            total_points: quiz.total_points,
            questions: quiz
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| QuestionForTaking::new(q, i as u32 + 1))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SessionView {
    pub session_id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub question_number: u32,
    pub question_count: u32,
    pub current_question: QuestionForTaking,
    pub selected_answer: Option<String>,
    pub answered_count: u32,
    pub started_at: DateTime<Utc>,
    /// Seconds, fixed when the session started.
    pub time_remaining: u32,
    /// Seconds left right now; informational only.
    pub time_remaining_now: u32,
}

impl SessionView {
    pub fn new(session: &AttemptSession, now: DateTime<Utc>) -> Self {
        SessionView {
            session_id: session.id,
            quiz_id: session.quiz_id,
            quiz_title: session.quiz_title.clone(),
            question_number: session.question_number(),
            question_count: session.question_count() as u32,
            current_question: QuestionForTaking::new(
                session.current_question(),
                session.question_number(),
            ),
            selected_answer: session.selected_answer.clone(),
            answered_count: session.answers.len() as u32,
            started_at: session.started_at,
            time_remaining: session.time_remaining,
            time_remaining_now: session.time_remaining_at(now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct AnswerEntry {
    pub question_number: u32,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AttemptRecordDto {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub student_id: String,
    pub student_name: String,
    pub answers: Vec<AnswerEntry>,
    pub question_results: Vec<QuestionResult>,
    pub score: u32,
    pub total_points: u32,
    pub percentage: f64,
    pub pending_review: Vec<u32>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub time_spent: u32,
}

impl From<AttemptRecord> for AttemptRecordDto {
    fn from(record: AttemptRecord) -> Self {
        let percentage = round_one_decimal(record.percentage());
        let pending_review = record.pending_review();
        AttemptRecordDto {
            id: record.id,
            quiz_id: record.quiz_id,
            quiz_title: record.quiz_title,
            student_id: record.student_id,
            student_name: record.student_name,
            answers: record
                .answers
                .into_iter()
                .map(|(question_number, answer)| AnswerEntry {
                    question_number,
                    answer,
                })
                .collect(),
            question_results: record.question_results,
            score: record.score,
            total_points: record.total_points,
            percentage,
            pending_review,
            started_at: record.started_at,
            completed_at: record.completed_at,
            time_spent: record.time_spent,
        }
    }
}

/// Result of `submitAnswer`: either the session moved on, or the attempt was
/// finalized and recorded.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SubmitAnswerPayload {
    pub completed: bool,
    pub session: Option<SessionView>,
    pub attempt: Option<AttemptRecordDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct AssessmentReport {
    pub attempt_id: Uuid,
    pub quiz_title: String,
    pub student_name: String,
    pub score: u32,
    pub total_points: u32,
    /// Rounded to one decimal.
    pub percentage: f64,
    pub band: PerformanceBand,
    pub performance: String,
    pub recommendation: String,
    pub time_spent: u32,
    pub time_efficiency: TimeEfficiency,
    pub time_efficiency_label: String,
    pub pending_review: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct BandCount {
    pub band: PerformanceBand,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct QuizStatistics {
    pub quiz_id: Uuid,
    pub attempts: u32,
    pub average_score: f64,
    pub average_percentage: f64,
    pub highest_score: Option<u32>,
    pub lowest_score: Option<u32>,
    pub band_distribution: Vec<BandCount>,
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
