use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

use crate::models::UserRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Player,
    Director,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "player",
            UserRole::Director => "director",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(UserRole::Player),
            "director" => Ok(UserRole::Director),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub telegram_username: Option<String>,
    pub telegram_id: Option<i64>,
    pub display_name: String,
    pub role: UserRole,
}

/// Player joined with the rating score it maps to (1000 when no rating row
/// matches the handle).
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PlayerWithRatingRow {
    pub id: Uuid,
    pub telegram_username: Option<String>,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub rating_score: i32,
}

const USER_COLUMNS: &str = "id, username, password_hash, telegram_username, telegram_id, \
     display_name, role, created_at";

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_telegram_username<'e>(
    executor: impl PgExecutor<'e>,
    telegram_username: &str,
) -> SqlxResult<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE telegram_username = $1"
    ))
    .bind(telegram_username)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: CreateUserData,
) -> SqlxResult<UserRow> {
    sqlx::query_as::<_, UserRow>(&format!(
        r#"
        INSERT INTO users (username, password_hash, telegram_username, telegram_id,
                           display_name, role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(data.username)
    .bind(data.password_hash)
    .bind(data.telegram_username)
    .bind(data.telegram_id)
    .bind(data.display_name)
    .bind(data.role.as_str())
    .fetch_one(executor)
    .await
}

/// All players with their rating score, newest account first.
pub async fn list_players_with_rating<'e>(
    executor: impl PgExecutor<'e>,
) -> SqlxResult<Vec<PlayerWithRatingRow>> {
    sqlx::query_as::<_, PlayerWithRatingRow>(
        r#"
        SELECT u.id, u.telegram_username, u.display_name, u.role, u.created_at,
               COALESCE(r.score, 1000) AS rating_score
        FROM users u
        LEFT JOIN rating r ON u.telegram_username = r.telegram_username
        WHERE u.role = 'player'
        ORDER BY u.created_at DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> SqlxResult<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_both_ways() {
        assert_eq!("player".parse::<UserRole>(), Ok(UserRole::Player));
        assert_eq!("director".parse::<UserRole>(), Ok(UserRole::Director));
        assert!("admin".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Director.as_str(), "director");
    }
}
