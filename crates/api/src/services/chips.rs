use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use infra::models::PlayerChipsRow;
use infra::repos::{player_chips, tournaments, users, UpsertPlayerChips};

/// Director chip update: absolute overwrite of the stack and the rebuy and
/// add-on counters. The ledger does not validate ranges or monotonicity.
pub async fn update_chips(
    pool: &PgPool,
    tournament_id: Uuid,
    player_user_id: Uuid,
    chips: i32,
    rebuys: i32,
    addons: i32,
) -> Result<PlayerChipsRow, AppError> {
    tournaments::get(pool, tournament_id)
        .await?
        .ok_or(AppError::NotFound("Tournament"))?;
    users::get_by_id(pool, player_user_id)
        .await?
        .ok_or(AppError::NotFound("Player"))?;

    let row = player_chips::upsert(
        pool,
        UpsertPlayerChips {
            tournament_id,
            user_id: player_user_id,
            chips,
            rebuys,
            addons,
        },
    )
    .await?;

    Ok(row)
}
