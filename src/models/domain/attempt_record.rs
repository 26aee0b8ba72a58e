use std::collections::BTreeMap;

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one question within a finalized attempt.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionResult {
    pub question_number: u32,
    pub question_id: u32,
    pub answer: Option<String>,
    pub is_correct: bool,
    pub points_earned: u32,
    pub points_possible: u32,
    pub pending_review: bool,
}

/// Immutable result of a completed quiz session. Records are only ever
/// appended, never edited or removed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub student_id: String,
    pub student_name: String,
    pub answers: BTreeMap<u32, String>,
    pub question_results: Vec<QuestionResult>,
    pub score: u32,
    pub total_points: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub time_spent: u32, // whole minutes
}

impl AttemptRecord {
    /// Raw percentage, 0 when the quiz carried no points.
    pub fn percentage(&self) -> f64 {
        if self.total_points == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_points) * 100.0
    }

    /// 1-based question numbers still waiting for a manual grade.
    pub fn pending_review(&self) -> Vec<u32> {
        self.question_results
            .iter()
            .filter(|r| r.pending_review)
            .map(|r| r.question_number)
            .collect()
    }
}
