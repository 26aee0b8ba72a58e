use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_QUESTION_POINTS: u32 = 10;
pub const DEFAULT_OPTION_COUNT: usize = 4;
pub const MAX_QUESTION_POINTS: u32 = 10_000;

const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum QuizQuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl QuizQuestionType {
    pub fn has_options(&self) -> bool {
        !matches!(self, QuizQuestionType::ShortAnswer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizQuestion {
    pub id: u32, // unique within the owning quiz, never reused
    pub text: String,
    pub question_type: QuizQuestionType,
    pub options: Vec<String>, // empty for short-answer
    pub correct_answer: String,
    pub points: u32,
}

/// Pending question input of an authoring form.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionDraft {
    pub text: String,
    pub question_type: QuizQuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: u32,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            text: String::new(),
            question_type: QuizQuestionType::MultipleChoice,
            options: vec![String::new(); DEFAULT_OPTION_COUNT],
            correct_answer: String::new(),
            points: DEFAULT_QUESTION_POINTS,
        }
    }
}

impl QuestionDraft {
    pub fn multiple_choice(text: &str, options: &[&str], correct_answer: &str, points: u32) -> Self {
        Self {
            text: text.to_string(),
            question_type: QuizQuestionType::MultipleChoice,
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.to_string(),
            points,
        }
    }

    pub fn true_false(text: &str, correct_answer: &str, points: u32) -> Self {
        Self {
            text: text.to_string(),
            question_type: QuizQuestionType::TrueFalse,
            options: Vec::new(),
            correct_answer: correct_answer.to_string(),
            points,
        }
    }

    pub fn short_answer(text: &str, reference_answer: &str, points: u32) -> Self {
        Self {
            text: text.to_string(),
            question_type: QuizQuestionType::ShortAnswer,
            options: Vec::new(),
            correct_answer: reference_answer.to_string(),
            points,
        }
    }

    /// Turns the draft into a question carrying `id`.
    ///
    /// Choice questions must name one of their options as the correct answer.
    /// True/false questions without options get `True`/`False`.
    pub fn build(&self, id: u32) -> AppResult<QuizQuestion> {
        if self.text.is_empty() {
            return Err(AppError::ValidationError(
                "Question text is required".to_string(),
            ));
        }

        if self.points == 0 || self.points > MAX_QUESTION_POINTS {
            return Err(AppError::ValidationError(format!(
                "Question points must be between 1 and {}",
                MAX_QUESTION_POINTS
            )));
        }

        let options = match self.question_type {
            QuizQuestionType::ShortAnswer => Vec::new(),
            QuizQuestionType::TrueFalse if self.options.iter().all(|o| o.is_empty()) => {
                TRUE_FALSE_OPTIONS.iter().map(|o| o.to_string()).collect()
            }
            QuizQuestionType::TrueFalse | QuizQuestionType::MultipleChoice => self.options.clone(),
        };

        if self.question_type.has_options()
            && (self.correct_answer.is_empty() || !options.contains(&self.correct_answer))
        {
            return Err(AppError::ValidationError(format!(
                "Correct answer '{}' must be one of the options",
                self.correct_answer
            )));
        }

        Ok(QuizQuestion {
            id,
            text: self.text.clone(),
            question_type: self.question_type,
            options,
            correct_answer: self.correct_answer.clone(),
            points: self.points,
        })
    }
}

/// Sum of question points, rejected instead of wrapping when it leaves `u32`.
pub fn sum_points<'a, I>(questions: I) -> AppResult<u32>
where
    I: IntoIterator<Item = &'a QuizQuestion>,
{
    questions.into_iter().try_fold(0u32, |total, q| {
        total.checked_add(q.points).ok_or_else(|| {
            AppError::ValidationError("Total points exceed the supported maximum".to_string())
        })
    })
}

impl From<&QuizQuestion> for QuestionDraft {
    fn from(question: &QuizQuestion) -> Self {
        Self {
            text: question.text.clone(),
            question_type: question.question_type,
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
            points: question.points,
        }
    }
}
