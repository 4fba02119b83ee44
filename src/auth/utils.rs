use crate::{
    auth::{claims::UserRole, Claims},
    errors::{AppError, AppResult},
};

pub fn require_author(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Author {
        return Err(AppError::Forbidden(
            "Only quiz authors can perform this action".to_string(),
        ));
    }
    Ok(())
}
