use std::collections::HashMap;

use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::TableAssignmentRow;

#[derive(Debug, Clone)]
pub struct UpsertAssignment {
    pub tournament_id: Uuid,
    pub table_id: Uuid,
    pub user_id: Uuid,
    pub seat_number: i32,
}

/// Seated player view for one table, rating and chips joined in (chips
/// fall back to the tournament's buy-in amount).
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct SeatedPlayerRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub telegram_username: Option<String>,
    pub seat_number: i32,
    pub rating: i32,
    pub chips: i32,
}

/// Existing seat numbers keyed by user, the lookup the seating planner
/// preserves across runs.
pub async fn seat_numbers_by_user<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<HashMap<Uuid, i32>> {
    let rows: Vec<(Uuid, i32)> = sqlx::query_as(
        r#"
        SELECT user_id, seat_number
        FROM table_assignments
        WHERE tournament_id = $1
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Insert-or-relocate keyed by (tournament, user): the table and seat are
/// overwritten, the row itself survives re-runs.
pub async fn upsert<'e>(
    executor: impl PgExecutor<'e>,
    data: UpsertAssignment,
) -> SqlxResult<TableAssignmentRow> {
    sqlx::query_as::<_, TableAssignmentRow>(
        r#"
        INSERT INTO table_assignments (tournament_id, table_id, user_id, seat_number)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (tournament_id, user_id)
        DO UPDATE SET table_id = EXCLUDED.table_id,
                      seat_number = EXCLUDED.seat_number
        RETURNING id, tournament_id, table_id, user_id, seat_number, assigned_at
        "#,
    )
    .bind(data.tournament_id)
    .bind(data.table_id)
    .bind(data.user_id)
    .bind(data.seat_number)
    .fetch_one(executor)
    .await
}

pub async fn list_seated_for_table<'e>(
    executor: impl PgExecutor<'e>,
    table_id: Uuid,
) -> SqlxResult<Vec<SeatedPlayerRow>> {
    sqlx::query_as::<_, SeatedPlayerRow>(
        r#"
        SELECT u.id AS user_id, u.display_name, u.telegram_username, ta.seat_number,
               COALESCE(r.score, 1000) AS rating,
               COALESCE(pc.chips, t.buy_in_chips) AS chips
        FROM table_assignments ta
        JOIN users u ON u.id = ta.user_id
        JOIN tournaments t ON t.id = ta.tournament_id
        LEFT JOIN rating r ON r.telegram_username = u.telegram_username
        LEFT JOIN player_chips pc
               ON pc.tournament_id = ta.tournament_id AND pc.user_id = ta.user_id
        WHERE ta.table_id = $1
        ORDER BY ta.seat_number ASC
        "#,
    )
    .bind(table_id)
    .fetch_all(executor)
    .await
}

pub async fn delete_for_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM table_assignments WHERE tournament_id = $1")
        .bind(tournament_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_for_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM table_assignments WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
