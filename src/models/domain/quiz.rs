use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        quiz_question::{sum_points, QuestionDraft, QuizQuestion},
        user::Identity,
    },
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub course_name: String,
    pub questions: Vec<QuizQuestion>, // order is the navigation order
    pub time_limit: u32,              // minutes
    pub total_points: u32,            // sum of question points, recomputed on every change
    pub attempts: u32,                // finalized attempt records
    pub is_published: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) next_question_id: u32,
}

impl Quiz {
    pub fn new(
        title: &str,
        description: &str,
        course_id: &str,
        course_name: &str,
        time_limit: u32,
        created_by: &str,
    ) -> Self {
        let now = Utc::now();
        Quiz {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            course_id: course_id.to_string(),
            course_name: course_name.to_string(),
            questions: Vec::new(),
            time_limit,
            total_points: 0,
            attempts: 0,
            is_published: false,
            created_by: created_by.to_string(),
            created_at: now,
            modified_at: now,
            next_question_id: 1,
        }
    }

    /// Appends a question built from `draft`. Ids come from a per-quiz counter
    /// and are never handed out twice, even after removals.
    pub fn append_question(&mut self, draft: &QuestionDraft) -> AppResult<&QuizQuestion> {
        let question = draft.build(self.next_question_id)?;
        let total_points = sum_points(self.questions.iter().chain([&question]))?;

        self.next_question_id += 1;
        self.questions.push(question);
        self.touch(total_points);

        let last = self.questions.len() - 1;
        Ok(&self.questions[last])
    }

    pub fn remove_question(&mut self, question_id: u32) -> AppResult<QuizQuestion> {
        let position = self
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Question {} not found in quiz '{}'",
                    question_id, self.id
                ))
            })?;

        let total_points = sum_points(
            self.questions
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, q)| q),
        )?;
        let removed = self.questions.remove(position);
        self.touch(total_points);
        Ok(removed)
    }

    /// Flips the publication flag and returns the new value.
    pub fn toggle_publish(&mut self) -> bool {
        self.is_published = !self.is_published;
        self.modified_at = Utc::now();
        self.is_published
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Learners only see published quizzes; authors see everything.
    pub fn is_visible_to(&self, identity: &Identity) -> bool {
        self.is_published || identity.role.can_author()
    }

    fn touch(&mut self, total_points: u32) {
        self.total_points = total_points;
        self.modified_at = Utc::now();
    }
}
