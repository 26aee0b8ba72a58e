use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    /// Teachers and admins may author quizzes and read everyone's results.
    pub fn can_author(&self) -> bool {
        matches!(self, UserRole::Teacher | UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(UserRole::Student),
            "teacher" => Ok(UserRole::Teacher),
            "admin" => Ok(UserRole::Admin),
            other => Err(AppError::ValidationError(format!("Unknown role '{}'", other))),
        }
    }
}

/// The acting user as supplied by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(id: &str, name: &str, role: UserRole) -> Self {
        Identity {
            id: id.to_string(),
            name: name.to_string(),
            role,
        }
    }
}
