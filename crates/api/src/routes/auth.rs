use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::verify_password;
use crate::error::AppError;
use crate::state::AppState;
use infra::models::UserRow;
use infra::repos::users;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramLoginRequest {
    pub telegram_username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: Option<String>,
    pub telegram_username: Option<String>,
    pub telegram_id: Option<i64>,
    pub display_name: String,
    pub role: String,
    pub auth_type: &'static str,
}

impl UserView {
    fn from_row(user: UserRow, auth_type: &'static str) -> Self {
        Self {
            id: user.id,
            username: user.username,
            telegram_username: user.telegram_username,
            telegram_id: user.telegram_id,
            display_name: user.display_name,
            role: user.role,
            auth_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserView,
}

/// Credential login for the web front-end.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            return Err(AppError::Validation(
                "Username and password are required".into(),
            ))
        }
    };

    let user = users::get_by_username(&state.db, &username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let valid = user
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(&password, hash));
    if !valid {
        return Err(AppError::Unauthorized("Invalid password"));
    }

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user: UserView::from_row(user, "web"),
    }))
}

/// Handle-based login for accounts identified by their messaging handle.
pub async fn telegram_login(
    State(state): State<AppState>,
    Json(req): Json<TelegramLoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let handle = req
        .telegram_username
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::Validation("Telegram username is required".into()))?;

    let user = users::get_by_telegram_username(&state.db, handle.trim_start_matches('@'))
        .await?
        .ok_or(AppError::NotFound("Player"))?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user: UserView::from_row(user, "telegram"),
    }))
}
