#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::{Identity, QuizQuestionType, UserRole},
        dto::request::{CreateQuizRequest, QuestionInput},
    };

    /// Creates a standard teacher identity
    pub fn test_teacher() -> Identity {
        Identity::new("teacher-1", "Tia Teacher", UserRole::Teacher)
    }

    /// Creates a student identity with the given id
    pub fn test_student(id: &str) -> Identity {
        Identity::new(id, &format!("Student {}", id), UserRole::Student)
    }

    /// A quiz worth 15 points: a 10 point multiple choice and a 5 point
    /// true/false question.
    pub fn test_quiz_request(title: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            title: title.to_string(),
            description: "Ownership and borrowing".to_string(),
            course_id: "rust-101".to_string(),
            course_name: "Intro to Rust".to_string(),
            time_limit: 10,
            questions: vec![
                QuestionInput {
                    text: "Which type owns heap data?".to_string(),
                    question_type: QuizQuestionType::MultipleChoice,
                    options: vec!["&str".to_string(), "String".to_string()],
                    correct_answer: "String".to_string(),
                    points: 10,
                },
                QuestionInput {
                    text: "A value can have two mutable borrows at once.".to_string(),
                    question_type: QuizQuestionType::TrueFalse,
                    options: Vec::new(),
                    correct_answer: "False".to_string(),
                    points: 5,
                },
            ],
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use async_graphql::{Request, Response};

    use crate::{
        app_state::AppState, config::Config, graphql::Schema, models::domain::Identity,
    };

    /// Fresh, unseeded store
    pub async fn test_state() -> AppState {
        AppState::new(Config::test_config())
            .await
            .expect("test state should initialize")
    }

    /// Runs `query` with `identity` as the acting user
    pub async fn execute_as(schema: &Schema, identity: &Identity, query: &str) -> Response {
        schema
            .execute(Request::new(query).data(identity.clone()))
            .await
    }

    /// Returns the `code` extension of the first error
    pub fn first_error_code(response: &Response) -> Option<String> {
        response
            .errors
            .first()
            .and_then(|e| e.extensions.as_ref())
            .and_then(|ext| ext.get("code"))
            .map(|code| code.to_string().trim_matches('"').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_teacher() {
        let teacher = test_teacher();
        assert!(teacher.role.can_author());
    }

    #[test]
    fn test_fixtures_test_student() {
        let student = test_student("s-9");
        assert_eq!(student.id, "s-9");
        assert_eq!(student.name, "Student s-9");
        assert!(!student.role.can_author());
    }

    #[test]
    fn test_fixtures_quiz_request() {
        let request = test_quiz_request("Borrowing");
        assert_eq!(request.questions.len(), 2);
        assert_eq!(request.questions.iter().map(|q| q.points).sum::<u32>(), 15);
    }
}
