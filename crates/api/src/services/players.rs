use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use infra::models::UserRow;
use infra::repos::{
    player_chips, rating, rating::CreateRatingEntry, registrations, table_assignments, users,
    CreateUserData, UserRole,
};

/// Create a player account together with its rating row (score 1000).
/// The handle is stored without the leading `@`.
pub async fn create_player(
    pool: &PgPool,
    director_id: Uuid,
    telegram_username: &str,
    display_name: &str,
) -> Result<UserRow, AppError> {
    let handle = telegram_username.trim_start_matches('@');

    if users::get_by_telegram_username(pool, handle).await?.is_some() {
        return Err(AppError::Validation("Player already exists".into()));
    }

    let mut tx = pool.begin().await?;

    let user = users::create(
        &mut *tx,
        CreateUserData {
            username: None,
            password_hash: None,
            telegram_username: Some(handle.to_string()),
            telegram_id: None,
            display_name: display_name.to_string(),
            role: UserRole::Player,
        },
    )
    .await?;

    rating::create(
        &mut *tx,
        CreateRatingEntry {
            player_name: display_name.to_string(),
            telegram_username: handle.to_string(),
            score: 1000,
            created_by: director_id,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(user)
}

/// Delete a player and everything keyed to them, the rating row included
/// (matched by handle, the only link it has).
pub async fn delete_player(pool: &PgPool, player_id: Uuid) -> Result<(), AppError> {
    let player = users::get_by_id(pool, player_id)
        .await?
        .ok_or(AppError::NotFound("Player"))?;

    let mut tx = pool.begin().await?;

    if let Some(handle) = &player.telegram_username {
        rating::delete_by_handle(&mut *tx, handle).await?;
    }
    registrations::delete_for_user(&mut *tx, player_id).await?;
    table_assignments::delete_for_user(&mut *tx, player_id).await?;
    player_chips::delete_for_user(&mut *tx, player_id).await?;
    users::delete(&mut *tx, player_id).await?;

    tx.commit().await?;

    tracing::info!(%player_id, "player deleted");
    Ok(())
}
