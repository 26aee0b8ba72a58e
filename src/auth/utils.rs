use async_graphql::Context;

use crate::{
    errors::{AppError, AppResult},
    models::domain::user::Identity,
};

pub fn require_author(identity: &Identity) -> AppResult<()> {
    if !identity.role.can_author() {
        return Err(AppError::Forbidden(
            "Only teachers and admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Learners may only read their own results; authors may read anyone's.
pub fn require_owner_or_author(identity: &Identity, resource_owner: &str) -> AppResult<()> {
    if !identity.role.can_author() && identity.id != resource_owner {
        return Err(AppError::Forbidden(
            "You can only access your own attempts".to_string(),
        ));
    }
    Ok(())
}

pub fn extract_identity_from_context(ctx: &Context<'_>) -> AppResult<Identity> {
    ctx.data::<Identity>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
