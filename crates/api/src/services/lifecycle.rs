use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use infra::models::TournamentRow;
use infra::repos::{
    player_chips, registrations, table_assignments, tournament_tables, tournaments,
    TournamentStatus,
};

pub struct StartResult {
    pub tournament: TournamentRow,
    pub seeded_players: u64,
}

/// Open play: persist `active` and hand every registered player their
/// buy-in stack. Re-running only tops up players that were never seeded.
pub async fn start(pool: &PgPool, tournament_id: Uuid) -> Result<StartResult, AppError> {
    let mut tx = pool.begin().await?;

    let tournament = tournaments::update_status(&mut *tx, tournament_id, TournamentStatus::Active)
        .await?
        .ok_or(AppError::NotFound("Tournament"))?;

    let seeded_players = player_chips::seed_for_registered(&mut *tx, tournament_id).await?;

    tx.commit().await?;

    tracing::info!(%tournament_id, seeded_players, "tournament started");

    Ok(StartResult {
        tournament,
        seeded_players,
    })
}

/// Stop accepting entries regardless of the late-registration clock.
pub async fn close_late_registration(
    pool: &PgPool,
    tournament_id: Uuid,
) -> Result<TournamentRow, AppError> {
    tournaments::update_status(pool, tournament_id, TournamentStatus::ActiveNoLateReg)
        .await?
        .ok_or(AppError::NotFound("Tournament"))
}

pub async fn complete(pool: &PgPool, tournament_id: Uuid) -> Result<TournamentRow, AppError> {
    tournaments::update_status(pool, tournament_id, TournamentStatus::Completed)
        .await?
        .ok_or(AppError::NotFound("Tournament"))
}

/// Remove the tournament and everything hanging off it.
pub async fn delete(pool: &PgPool, tournament_id: Uuid) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    table_assignments::delete_for_tournament(&mut *tx, tournament_id).await?;
    tournament_tables::delete_for_tournament(&mut *tx, tournament_id).await?;
    registrations::delete_for_tournament(&mut *tx, tournament_id).await?;
    player_chips::delete_for_tournament(&mut *tx, tournament_id).await?;
    let deleted = tournaments::delete(&mut *tx, tournament_id).await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Tournament"));
    }

    tx.commit().await?;

    tracing::info!(%tournament_id, "tournament deleted");
    Ok(())
}
