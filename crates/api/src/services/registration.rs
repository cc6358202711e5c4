use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use infra::models::RegistrationRow;
use infra::repos::{player_chips, registrations, tournaments, users, TournamentStatus};

/// Register a player for a tournament.
///
/// The guard runs against the persisted status: the clock only matters once
/// a director has already started the tournament. A successful registration
/// into a running tournament also seeds the player's stack so they are
/// immediately playable.
pub async fn register(
    pool: &PgPool,
    user_id: Uuid,
    tournament_id: Uuid,
    now: DateTime<Utc>,
) -> Result<RegistrationRow, AppError> {
    let mut tx = pool.begin().await?;

    users::get_by_id(&mut *tx, user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let tournament = tournaments::get(&mut *tx, tournament_id)
        .await?
        .ok_or(AppError::NotFound("Tournament"))?;

    match tournament.status {
        TournamentStatus::Completed => {
            return Err(AppError::RegistrationClosed("Tournament is completed"));
        }
        TournamentStatus::ActiveNoLateReg => {
            return Err(AppError::RegistrationClosed("Late registration is closed"));
        }
        TournamentStatus::Active if now > tournament.late_reg_end_time => {
            return Err(AppError::LateRegistrationExpired);
        }
        _ => {}
    }

    if registrations::get(&mut *tx, tournament_id, user_id)
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyRegistered);
    }

    let registration = registrations::insert(&mut *tx, tournament_id, user_id).await?;

    if tournament.status == TournamentStatus::Active {
        player_chips::seed_for_user(&mut *tx, tournament_id, user_id).await?;
    }

    tx.commit().await?;

    Ok(registration)
}
