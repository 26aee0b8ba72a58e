use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Helper to parse UUID from GraphQL ID string
pub fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("not-a-uuid"),
            Err(AppError::ValidationError(_))
        ));
    }
}
