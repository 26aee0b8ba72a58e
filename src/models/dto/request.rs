use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::quiz_question::{
    QuestionDraft, QuizQuestion, QuizQuestionType, DEFAULT_QUESTION_POINTS,
};

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[graphql(default)]
    #[serde(default)]
    pub course_id: String,

    #[graphql(default)]
    #[serde(default)]
    pub course_name: String,

    #[validate(range(
        min = 1,
        max = 10_080,
        message = "Time limit must be between one minute and one week"
    ))]
    pub time_limit: u32,

    #[graphql(default)]
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct QuestionInput {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub text: String,

    pub question_type: QuizQuestionType,

    #[graphql(default)]
    #[serde(default)]
    pub options: Vec<String>,

    pub correct_answer: String,

    #[graphql(default = 10)]
    #[serde(default = "default_points")]
    #[validate(range(min = 1, max = 10_000, message = "Points must be between 1 and 10000"))]
    pub points: u32,
}

fn default_points() -> u32 {
    DEFAULT_QUESTION_POINTS
}

impl From<&QuestionInput> for QuestionDraft {
    fn from(input: &QuestionInput) -> Self {
        QuestionDraft {
            text: input.text.clone(),
            question_type: input.question_type,
            options: input.options.clone(),
            correct_answer: input.correct_answer.clone(),
            points: input.points,
        }
    }
}

impl From<&QuizQuestion> for QuestionInput {
    fn from(question: &QuizQuestion) -> Self {
        QuestionInput {
            text: question.text.clone(),
            question_type: question.question_type,
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            points: question.points,
        }
    }
}
