use serde::{Deserialize, Serialize};

use crate::{
    errors::AppResult,
    models::{
        domain::quiz_question::{sum_points, QuestionDraft, QuizQuestion},
        dto::request::{CreateQuizRequest, QuestionInput},
    },
};

/// Authoring form state: quiz metadata, the questions collected so far and
/// the question currently being filled in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub course_id: String,
    pub course_name: String,
    pub time_limit: u32,
    pub questions: Vec<QuizQuestion>,
    pub question_input: QuestionDraft,
}

impl QuizDraft {
    pub fn new(
        title: &str,
        description: &str,
        course_id: &str,
        course_name: &str,
        time_limit: u32,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            course_id: course_id.to_string(),
            course_name: course_name.to_string(),
            time_limit,
            ..Self::default()
        }
    }

    /// Moves the pending question input into the draft.
    ///
    /// On a validation failure the input is kept so the author can fix it.
    pub fn add_question(&mut self) -> AppResult<&QuizQuestion> {
        let next_id = self.questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let question = self.question_input.build(next_id)?;
        sum_points(self.questions.iter().chain([&question]))?;

        self.questions.push(question);
        self.question_input = QuestionDraft::default();

        let last = self.questions.len() - 1;
        Ok(&self.questions[last])
    }

    pub fn total_points(&self) -> AppResult<u32> {
        sum_points(&self.questions)
    }

    pub fn into_request(self) -> CreateQuizRequest {
        CreateQuizRequest {
            title: self.title,
            description: self.description,
            course_id: self.course_id,
            course_name: self.course_name,
            time_limit: self.time_limit,
            questions: self.questions.iter().map(QuestionInput::from).collect(),
        }
    }
}
