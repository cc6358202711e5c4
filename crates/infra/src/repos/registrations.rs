use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::RegistrationRow;

/// Registered player joined with rating and chip counters for the tournament
/// detail view. Chips fall back to the tournament's buy-in amount when no
/// ledger row exists yet.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TournamentPlayerRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub telegram_username: Option<String>,
    pub rating: i32,
    pub chips: i32,
    pub rebuys: i32,
    pub addons: i32,
}

pub async fn get<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    user_id: Uuid,
) -> SqlxResult<Option<RegistrationRow>> {
    sqlx::query_as::<_, RegistrationRow>(
        r#"
        SELECT id, tournament_id, user_id, registered_at
        FROM registrations
        WHERE tournament_id = $1 AND user_id = $2
        "#,
    )
    .bind(tournament_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    user_id: Uuid,
) -> SqlxResult<RegistrationRow> {
    sqlx::query_as::<_, RegistrationRow>(
        r#"
        INSERT INTO registrations (tournament_id, user_id)
        VALUES ($1, $2)
        RETURNING id, tournament_id, user_id, registered_at
        "#,
    )
    .bind(tournament_id)
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Registered user ids in registration order. The seat-assignment engine
/// depends on this ordering being stable between runs.
pub async fn list_user_ids<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<Vec<Uuid>> {
    let rows: Vec<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT user_id
        FROM registrations
        WHERE tournament_id = $1
        ORDER BY registered_at ASC, id ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn list_players<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<Vec<TournamentPlayerRow>> {
    sqlx::query_as::<_, TournamentPlayerRow>(
        r#"
        SELECT u.id AS user_id, u.display_name, u.telegram_username,
               COALESCE(rat.score, 1000) AS rating,
               COALESCE(pc.chips, t.buy_in_chips) AS chips,
               COALESCE(pc.rebuys, 0) AS rebuys,
               COALESCE(pc.addons, 0) AS addons
        FROM registrations r
        JOIN users u ON u.id = r.user_id
        JOIN tournaments t ON t.id = r.tournament_id
        LEFT JOIN rating rat ON rat.telegram_username = u.telegram_username
        LEFT JOIN player_chips pc
               ON pc.tournament_id = r.tournament_id AND pc.user_id = r.user_id
        WHERE r.tournament_id = $1
        ORDER BY u.display_name ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

pub async fn delete_for_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM registrations WHERE tournament_id = $1")
        .bind(tournament_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_for_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM registrations WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
