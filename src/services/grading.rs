use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    errors::AppError,
    models::domain::quiz_question::{QuizQuestion, QuizQuestionType},
};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN is a valid regex pattern"));

/// How submitted answers are compared with the correct answer.
///
/// Choice questions are always compared exactly; the strategy only changes
/// how short-answer responses are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradingStrategy {
    #[default]
    Exact,
    Normalized,
    ManualReview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    PendingReview,
}

impl GradingStrategy {
    pub fn evaluate(&self, question: &QuizQuestion, answer: Option<&str>) -> Verdict {
        let Some(answer) = answer else {
            return Verdict::Incorrect;
        };

        match (question.question_type, self) {
            (QuizQuestionType::ShortAnswer, GradingStrategy::Normalized) => {
                verdict(normalize(answer) == normalize(&question.correct_answer))
            }
            (QuizQuestionType::ShortAnswer, GradingStrategy::ManualReview) => {
                Verdict::PendingReview
            }
            _ => verdict(answer == question.correct_answer),
        }
    }
}

impl FromStr for GradingStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(GradingStrategy::Exact),
            "normalized" => Ok(GradingStrategy::Normalized),
            "manual-review" | "manual_review" | "manual" => Ok(GradingStrategy::ManualReview),
            other => Err(AppError::ValidationError(format!(
                "Unknown grading strategy '{}'",
                other
            ))),
        }
    }
}

fn verdict(is_correct: bool) -> Verdict {
    if is_correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

fn normalize(answer: &str) -> String {
    WHITESPACE_RUN
        .replace_all(answer.trim(), " ")
        .to_lowercase()
}
