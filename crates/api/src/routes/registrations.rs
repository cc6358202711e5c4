use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::outcome::Outcome;
use crate::services::registration;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_id: Option<Uuid>,
    pub tournament_id: Option<Uuid>,
}

/// Self-service entry; directors may register themselves too.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Outcome>, AppError> {
    let user_id = req
        .user_id
        .ok_or_else(|| AppError::Validation("Authorization required".into()))?;
    let tournament_id = req
        .tournament_id
        .ok_or_else(|| AppError::Validation("Tournament id is required".into()))?;

    registration::register(&state.db, user_id, tournament_id, Utc::now()).await?;

    Ok(Json(Outcome::success("Registration successful")))
}
