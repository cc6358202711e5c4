use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::require_director;
use crate::error::AppError;
use crate::outcome::Outcome;
use crate::state::AppState;
use infra::models::RatingRow;
use infra::repos::rating::{self, CreateRatingEntry, UpdateRatingEntry};

#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    pub user_id: Uuid,
    pub player_name: Option<String>,
    pub telegram_username: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    pub user_id: Uuid,
    pub player_name: Option<String>,
    pub telegram_username: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct DirectorAction {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RatingWithPosition {
    pub id: Uuid,
    pub player_name: String,
    pub telegram_username: Option<String>,
    pub score: i32,
    pub position: i64,
}

#[derive(Debug, Serialize)]
pub struct RatingLookupResponse {
    pub success: bool,
    pub rating: RatingWithPosition,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RatingRow>>, AppError> {
    let rows = rating::list(&state.db).await?;
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRatingRequest>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;

    let (player_name, telegram_username) = match (req.player_name, req.telegram_username) {
        (Some(n), Some(h)) if !n.is_empty() && !h.is_empty() => (n, h),
        _ => {
            return Err(AppError::Validation(
                "Player name and Telegram username are required".into(),
            ))
        }
    };

    rating::create(
        &state.db,
        CreateRatingEntry {
            player_name,
            telegram_username: telegram_username.trim_start_matches('@').to_string(),
            score: req.score.unwrap_or(1000),
            created_by: req.user_id,
        },
    )
    .await?;

    Ok(Json(Outcome::success("Player added to rating")))
}

pub async fn update(
    State(state): State<AppState>,
    Path(rating_id): Path<Uuid>,
    Json(req): Json<UpdateRatingRequest>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;

    let (player_name, telegram_username, score) =
        match (req.player_name, req.telegram_username, req.score) {
            (Some(n), Some(h), Some(s)) if !n.is_empty() && !h.is_empty() => (n, h, s),
            _ => {
                return Err(AppError::Validation(
                    "Player name, Telegram username and score are required".into(),
                ))
            }
        };

    rating::update(
        &state.db,
        rating_id,
        UpdateRatingEntry {
            player_name,
            telegram_username: telegram_username.trim_start_matches('@').to_string(),
            score,
        },
    )
    .await?
    .ok_or(AppError::NotFound("Rating"))?;

    Ok(Json(Outcome::success("Rating updated")))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(rating_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;

    let deleted = rating::delete(&state.db, rating_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Rating"));
    }

    Ok(Json(Outcome::success("Player removed from rating")))
}

pub async fn by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<RatingLookupResponse>, AppError> {
    let row = rating::get_by_handle(&state.db, handle.trim_start_matches('@'))
        .await?
        .ok_or(AppError::NotFound("Rating"))?;

    let position = rating::position_for_score(&state.db, row.score).await?;

    Ok(Json(RatingLookupResponse {
        success: true,
        rating: RatingWithPosition {
            id: row.id,
            player_name: row.player_name,
            telegram_username: row.telegram_username,
            score: row.score,
            position,
        },
    }))
}
