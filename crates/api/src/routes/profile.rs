use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{rating, users};

#[derive(Debug, Serialize)]
pub struct RatingInfo {
    pub score: i32,
    pub position: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub telegram_username: Option<String>,
    pub display_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingInfo>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: Profile,
}

async fn rating_for_handle(
    state: &AppState,
    handle: Option<&str>,
) -> Result<Option<RatingInfo>, AppError> {
    let Some(handle) = handle else {
        return Ok(None);
    };

    // The rating row is a weak reference by handle; a missing match is a
    // legitimate answer, reported as the default score with no position.
    match rating::get_by_handle(&state.db, handle).await? {
        Some(row) => {
            let position = rating::position_for_score(&state.db, row.score).await?;
            Ok(Some(RatingInfo {
                score: row.score,
                position: Some(position),
            }))
        }
        None => Ok(Some(RatingInfo {
            score: 1000,
            position: None,
        })),
    }
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = users::get_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    // Directors run the club, they do not hold a rating.
    let rating = if user.is_director() {
        None
    } else {
        rating_for_handle(&state, user.telegram_username.as_deref()).await?
    };

    Ok(Json(ProfileResponse {
        success: true,
        profile: Profile {
            id: user.id,
            telegram_username: user.telegram_username,
            display_name: user.display_name,
            role: user.role,
            rating,
        },
    }))
}

pub async fn by_telegram(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let handle = handle.trim_start_matches('@');

    let user = users::get_by_telegram_username(&state.db, handle)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let rating = rating_for_handle(&state, user.telegram_username.as_deref()).await?;

    Ok(Json(ProfileResponse {
        success: true,
        profile: Profile {
            id: user.id,
            telegram_username: user.telegram_username,
            display_name: user.display_name,
            role: user.role,
            rating,
        },
    }))
}
