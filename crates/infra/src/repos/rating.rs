use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::RatingRow;

#[derive(Debug, Clone)]
pub struct CreateRatingEntry {
    pub player_name: String,
    pub telegram_username: String,
    pub score: i32,
    pub created_by: Uuid,
}

#[derive(Debug, Clone)]
pub struct UpdateRatingEntry {
    pub player_name: String,
    pub telegram_username: String,
    pub score: i32,
}

const RATING_COLUMNS: &str =
    "id, player_name, telegram_username, score, created_by, updated_at";

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Vec<RatingRow>> {
    sqlx::query_as::<_, RatingRow>(&format!(
        "SELECT {RATING_COLUMNS} FROM rating ORDER BY score DESC"
    ))
    .fetch_all(executor)
    .await
}

pub async fn get_by_handle<'e>(
    executor: impl PgExecutor<'e>,
    telegram_username: &str,
) -> SqlxResult<Option<RatingRow>> {
    sqlx::query_as::<_, RatingRow>(&format!(
        "SELECT {RATING_COLUMNS} FROM rating WHERE telegram_username = $1"
    ))
    .bind(telegram_username)
    .fetch_optional(executor)
    .await
}

/// 1-indexed rank: the count of strictly greater scores, plus one. Equal
/// scores share a position.
pub async fn position_for_score<'e>(
    executor: impl PgExecutor<'e>,
    score: i32,
) -> SqlxResult<i64> {
    let (greater,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM rating WHERE score > $1")
            .bind(score)
            .fetch_one(executor)
            .await?;
    Ok(greater + 1)
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateRatingEntry,
) -> SqlxResult<RatingRow> {
    sqlx::query_as::<_, RatingRow>(&format!(
        r#"
        INSERT INTO rating (player_name, telegram_username, score, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING {RATING_COLUMNS}
        "#
    ))
    .bind(data.player_name)
    .bind(data.telegram_username)
    .bind(data.score)
    .bind(data.created_by)
    .fetch_one(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    data: UpdateRatingEntry,
) -> SqlxResult<Option<RatingRow>> {
    sqlx::query_as::<_, RatingRow>(&format!(
        r#"
        UPDATE rating
        SET player_name = $2, telegram_username = $3, score = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING {RATING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(data.player_name)
    .bind(data.telegram_username)
    .bind(data.score)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM rating WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_by_handle<'e>(
    executor: impl PgExecutor<'e>,
    telegram_username: &str,
) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM rating WHERE telegram_username = $1")
        .bind(telegram_username)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
