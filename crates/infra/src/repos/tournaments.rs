use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::TournamentRow;

/// Persisted lifecycle status. Advances only forward, one director action
/// per transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(type_name = "tournament_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Registration,
    Active,
    ActiveNoLateReg,
    Completed,
}

impl TournamentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentStatus::Registration => "registration",
            TournamentStatus::Active => "active",
            TournamentStatus::ActiveNoLateReg => "active_no_late_reg",
            TournamentStatus::Completed => "completed",
        }
    }
}

impl FromStr for TournamentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(TournamentStatus::Registration),
            "active" => Ok(TournamentStatus::Active),
            "active_no_late_reg" => Ok(TournamentStatus::ActiveNoLateReg),
            "completed" => Ok(TournamentStatus::Completed),
            _ => Err(format!("Unknown tournament status: {}", s)),
        }
    }
}

/// Display status derived from the persisted one plus the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Registration,
    LateRegistration,
    Active,
    ActiveNoLateReg,
    Completed,
}

impl EffectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveStatus::Registration => "registration",
            EffectiveStatus::LateRegistration => "late_registration",
            EffectiveStatus::Active => "active",
            EffectiveStatus::ActiveNoLateReg => "active_no_late_reg",
            EffectiveStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTournamentData {
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub rebuy_cost: i32,
    pub rebuy_chips: i32,
    pub addon_cost: i32,
    pub addon_chips: i32,
    pub level_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub late_reg_end_time: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Full configuration overwrite; the persisted status is untouched.
#[derive(Debug, Clone)]
pub struct UpdateTournamentData {
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub rebuy_cost: i32,
    pub rebuy_chips: i32,
    pub addon_cost: i32,
    pub addon_chips: i32,
    pub level_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub late_reg_end_time: DateTime<Utc>,
}

/// Tournament joined with its registration count, for listings.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TournamentSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub buy_in_cost: i32,
    pub buy_in_chips: i32,
    pub rebuy_cost: i32,
    pub rebuy_chips: i32,
    pub addon_cost: i32,
    pub addon_chips: i32,
    pub level_minutes: i32,
    pub start_time: DateTime<Utc>,
    pub late_reg_end_time: DateTime<Utc>,
    pub status: TournamentStatus,
    pub registered_players: i64,
}

const TOURNAMENT_COLUMNS: &str = "id, name, buy_in_cost, buy_in_chips, rebuy_cost, rebuy_chips, \
     addon_cost, addon_chips, level_minutes, start_time, late_reg_end_time, \
     created_by, status, created_at, updated_at";

pub async fn get<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        "SELECT {TOURNAMENT_COLUMNS} FROM tournaments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// Tournaments that have not been completed, soonest first.
pub async fn list_open<'e>(
    executor: impl PgExecutor<'e>,
) -> SqlxResult<Vec<TournamentSummaryRow>> {
    sqlx::query_as::<_, TournamentSummaryRow>(
        r#"
        SELECT t.id, t.name, t.buy_in_cost, t.buy_in_chips, t.rebuy_cost, t.rebuy_chips,
               t.addon_cost, t.addon_chips, t.level_minutes, t.start_time,
               t.late_reg_end_time, t.status,
               COUNT(r.id) AS registered_players
        FROM tournaments t
        LEFT JOIN registrations r ON r.tournament_id = t.id
        WHERE t.status != 'completed'
        GROUP BY t.id
        ORDER BY t.start_time ASC
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Completed tournaments, most recent first.
pub async fn list_completed<'e>(
    executor: impl PgExecutor<'e>,
) -> SqlxResult<Vec<TournamentSummaryRow>> {
    sqlx::query_as::<_, TournamentSummaryRow>(
        r#"
        SELECT t.id, t.name, t.buy_in_cost, t.buy_in_chips, t.rebuy_cost, t.rebuy_chips,
               t.addon_cost, t.addon_chips, t.level_minutes, t.start_time,
               t.late_reg_end_time, t.status,
               COUNT(r.id) AS registered_players
        FROM tournaments t
        LEFT JOIN registrations r ON r.tournament_id = t.id
        WHERE t.status = 'completed'
        GROUP BY t.id
        ORDER BY t.start_time DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateTournamentData,
) -> SqlxResult<TournamentRow> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        r#"
        INSERT INTO tournaments (name, buy_in_cost, buy_in_chips, rebuy_cost, rebuy_chips,
                                 addon_cost, addon_chips, level_minutes, start_time,
                                 late_reg_end_time, created_by, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'registration')
        RETURNING {TOURNAMENT_COLUMNS}
        "#
    ))
    .bind(data.name)
    .bind(data.buy_in_cost)
    .bind(data.buy_in_chips)
    .bind(data.rebuy_cost)
    .bind(data.rebuy_chips)
    .bind(data.addon_cost)
    .bind(data.addon_chips)
    .bind(data.level_minutes)
    .bind(data.start_time)
    .bind(data.late_reg_end_time)
    .bind(data.created_by)
    .fetch_one(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateTournamentData,
) -> SqlxResult<Option<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        r#"
        UPDATE tournaments
        SET name = $2, buy_in_cost = $3, buy_in_chips = $4, rebuy_cost = $5,
            rebuy_chips = $6, addon_cost = $7, addon_chips = $8, level_minutes = $9,
            start_time = $10, late_reg_end_time = $11, updated_at = NOW()
        WHERE id = $1
        RETURNING {TOURNAMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(data.name)
    .bind(data.buy_in_cost)
    .bind(data.buy_in_chips)
    .bind(data.rebuy_cost)
    .bind(data.rebuy_chips)
    .bind(data.addon_cost)
    .bind(data.addon_chips)
    .bind(data.level_minutes)
    .bind(data.start_time)
    .bind(data.late_reg_end_time)
    .fetch_optional(executor)
    .await
}

/// Persist a lifecycle transition. Idempotent to re-application.
pub async fn update_status<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    status: TournamentStatus,
) -> SqlxResult<Option<TournamentRow>> {
    sqlx::query_as::<_, TournamentRow>(&format!(
        r#"
        UPDATE tournaments
        SET status = $2::tournament_status, updated_at = NOW()
        WHERE id = $1
        RETURNING {TOURNAMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TournamentStatus::Registration,
            TournamentStatus::Active,
            TournamentStatus::ActiveNoLateReg,
            TournamentStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<TournamentStatus>(), Ok(status));
        }
        assert!("paused".parse::<TournamentStatus>().is_err());
    }
}
