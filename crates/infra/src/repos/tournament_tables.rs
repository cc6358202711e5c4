use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::TournamentTableRow;

/// Table joined with its current seat count, for the tables view.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TableWithCountRow {
    pub id: Uuid,
    pub table_number: i32,
    pub max_seats: i32,
    pub seated_players: i64,
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    table_number: i32,
    max_seats: i32,
) -> SqlxResult<TournamentTableRow> {
    sqlx::query_as::<_, TournamentTableRow>(
        r#"
        INSERT INTO tournament_tables (tournament_id, table_number, max_seats)
        VALUES ($1, $2, $3)
        RETURNING id, tournament_id, table_number, max_seats, created_at
        "#,
    )
    .bind(tournament_id)
    .bind(table_number)
    .bind(max_seats)
    .fetch_one(executor)
    .await
}

pub async fn list_with_counts<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<Vec<TableWithCountRow>> {
    sqlx::query_as::<_, TableWithCountRow>(
        r#"
        SELECT tt.id, tt.table_number, tt.max_seats,
               COUNT(ta.id) AS seated_players
        FROM tournament_tables tt
        LEFT JOIN table_assignments ta ON ta.table_id = tt.id
        WHERE tt.tournament_id = $1
        GROUP BY tt.id, tt.table_number, tt.max_seats
        ORDER BY tt.table_number ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

/// Wipe the table grouping. Assignments survive; their deferred FK is
/// re-pointed by the seating run before commit.
pub async fn delete_for_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM tournament_tables WHERE tournament_id = $1")
        .bind(tournament_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
