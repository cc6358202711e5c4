use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::PlayerChipsRow;

/// Absolute overwrite of all three counters; the ledger trusts the caller.
#[derive(Debug, Clone)]
pub struct UpsertPlayerChips {
    pub tournament_id: Uuid,
    pub user_id: Uuid,
    pub chips: i32,
    pub rebuys: i32,
    pub addons: i32,
}

const CHIP_COLUMNS: &str = "id, tournament_id, user_id, chips, rebuys, addons, updated_at";

pub async fn get<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    user_id: Uuid,
) -> SqlxResult<Option<PlayerChipsRow>> {
    sqlx::query_as::<_, PlayerChipsRow>(&format!(
        "SELECT {CHIP_COLUMNS} FROM player_chips WHERE tournament_id = $1 AND user_id = $2"
    ))
    .bind(tournament_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_for_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<Vec<PlayerChipsRow>> {
    sqlx::query_as::<_, PlayerChipsRow>(&format!(
        "SELECT {CHIP_COLUMNS} FROM player_chips WHERE tournament_id = $1 ORDER BY chips DESC"
    ))
    .bind(tournament_id)
    .fetch_all(executor)
    .await
}

/// Seed a chip row for every registered player that has none yet. Existing
/// rows are never overwritten, so a repeated `start` cannot reset stacks.
pub async fn seed_for_registered<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO player_chips (tournament_id, user_id, chips)
        SELECT r.tournament_id, r.user_id, t.buy_in_chips
        FROM registrations r
        JOIN tournaments t ON t.id = r.tournament_id
        WHERE r.tournament_id = $1
        ON CONFLICT (tournament_id, user_id) DO NOTHING
        "#,
    )
    .bind(tournament_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Seed a single late joiner with the buy-in amount, insert-if-absent.
pub async fn seed_for_user<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
    user_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO player_chips (tournament_id, user_id, chips)
        SELECT t.id, $2, t.buy_in_chips
        FROM tournaments t
        WHERE t.id = $1
        ON CONFLICT (tournament_id, user_id) DO NOTHING
        "#,
    )
    .bind(tournament_id)
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub async fn upsert<'e>(
    executor: impl PgExecutor<'e>,
    data: UpsertPlayerChips,
) -> SqlxResult<PlayerChipsRow> {
    sqlx::query_as::<_, PlayerChipsRow>(&format!(
        r#"
        INSERT INTO player_chips (tournament_id, user_id, chips, rebuys, addons, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (tournament_id, user_id)
        DO UPDATE SET chips = EXCLUDED.chips,
                      rebuys = EXCLUDED.rebuys,
                      addons = EXCLUDED.addons,
                      updated_at = NOW()
        RETURNING {CHIP_COLUMNS}
        "#
    ))
    .bind(data.tournament_id)
    .bind(data.user_id)
    .bind(data.chips)
    .bind(data.rebuys)
    .bind(data.addons)
    .fetch_one(executor)
    .await
}

pub async fn delete_for_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM player_chips WHERE tournament_id = $1")
        .bind(tournament_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_for_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM player_chips WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
