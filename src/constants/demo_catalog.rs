use crate::models::{
    domain::quiz_question::QuizQuestionType,
    dto::request::{CreateQuizRequest, QuestionInput},
};

pub const DEMO_AUTHOR_ID: &str = "demo-instructor";
pub const DEMO_AUTHOR_NAME: &str = "Demo Instructor";

pub struct DemoQuiz {
    pub request: CreateQuizRequest,
    pub published: bool,
}

fn question(
    text: &str,
    question_type: QuizQuestionType,
    options: &[&str],
    correct_answer: &str,
    points: u32,
) -> QuestionInput {
    QuestionInput {
        text: text.to_string(),
        question_type,
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct_answer.to_string(),
        points,
    }
}

/// Catalog loaded into a fresh store when demo seeding is enabled.
pub fn demo_quizzes() -> Vec<DemoQuiz> {
    vec![
        DemoQuiz {
            request: CreateQuizRequest {
                title: "HTML & CSS Basics".to_string(),
                description: "Check your grasp of document structure and styling fundamentals."
                    .to_string(),
                course_id: "web-101".to_string(),
                course_name: "Web Development Foundations".to_string(),
                time_limit: 15,
                questions: vec![
                    question(
                        "Which tag defines the largest heading?",
                        QuizQuestionType::MultipleChoice,
                        &["<h6>", "<heading>", "<h1>", "<head>"],
                        "<h1>",
                        10,
                    ),
                    question(
                        "CSS stands for Cascading Style Sheets.",
                        QuizQuestionType::TrueFalse,
                        &[],
                        "True",
                        5,
                    ),
                    question(
                        "Which CSS property sets the text color?",
                        QuizQuestionType::ShortAnswer,
                        &[],
                        "color",
                        5,
                    ),
                ],
            },
            published: true,
        },
        DemoQuiz {
            request: CreateQuizRequest {
                title: "JavaScript Fundamentals".to_string(),
                description: "Variables, types and functions.".to_string(),
                course_id: "web-102".to_string(),
                course_name: "JavaScript for Beginners".to_string(),
                time_limit: 20,
                questions: vec![
                    question(
                        "Which keyword declares a block-scoped constant?",
                        QuizQuestionType::MultipleChoice,
                        &["var", "let", "const", "static"],
                        "const",
                        10,
                    ),
                    question(
                        "typeof null returns \"object\".",
                        QuizQuestionType::TrueFalse,
                        &[],
                        "True",
                        10,
                    ),
                ],
            },
            published: true,
        },
        DemoQuiz {
            request: CreateQuizRequest {
                title: "Responsive Layouts".to_string(),
                description: "Flexbox, grid and media queries.".to_string(),
                course_id: "web-201".to_string(),
                course_name: "Modern CSS".to_string(),
                time_limit: 25,
                questions: vec![question(
                    "Which display value enables flexbox?",
                    QuizQuestionType::ShortAnswer,
                    &[],
                    "flex",
                    10,
                )],
            },
            published: false,
        },
    ]
}
