use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use infra::models::UserRow;
use infra::repos::users;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// Director gate for every mutating operation. An unknown actor id is
/// indistinguishable from a non-director.
pub async fn require_director(db: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    let user = users::get_by_id(db, user_id).await?;
    match user {
        Some(user) if user.is_director() => Ok(user),
        _ => Err(AppError::AccessDenied),
    }
}
