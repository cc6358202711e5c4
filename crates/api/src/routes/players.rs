use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::require_director;
use crate::error::AppError;
use crate::outcome::Outcome;
use crate::services::players;
use crate::state::AppState;
use infra::repos::users::{self, PlayerWithRatingRow};

#[derive(Debug, Deserialize)]
pub struct DirectorQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub user_id: Uuid,
    pub telegram_username: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DirectorAction {
    pub user_id: Uuid,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DirectorQuery>,
) -> Result<Json<Vec<PlayerWithRatingRow>>, AppError> {
    require_director(&state.db, query.user_id).await?;
    let players = users::list_players_with_rating(&state.db).await?;
    Ok(Json(players))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;

    let (handle, display_name) = match (req.telegram_username, req.display_name) {
        (Some(h), Some(n)) if !h.is_empty() && !n.is_empty() => (h, n),
        _ => return Err(AppError::Validation("All fields are required".into())),
    };

    let player = players::create_player(&state.db, req.user_id, &handle, &display_name).await?;

    Ok(Json(Outcome::success(format!(
        "Player {} created",
        player.display_name
    ))))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
    Json(req): Json<DirectorAction>,
) -> Result<Json<Outcome>, AppError> {
    require_director(&state.db, req.user_id).await?;
    players::delete_player(&state.db, player_id).await?;
    Ok(Json(Outcome::success("Player deleted")))
}
