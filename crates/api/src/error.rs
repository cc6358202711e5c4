use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::outcome::Outcome;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Access denied")]
    AccessDenied,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("You are already registered for this tournament")]
    AlreadyRegistered,

    #[error("{0}")]
    RegistrationClosed(&'static str),

    #[error("Late registration has ended")]
    LateRegistrationExpired,

    #[error("{0}")]
    NothingToAssign(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyRegistered
            | AppError::RegistrationClosed(_)
            | AppError::LateRegistrationExpired
            | AppError::NothingToAssign(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let AppError::Db(ref err) = self {
            tracing::error!("database failure: {err}");
        }

        (status, Json(Outcome::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_statuses_match_error_kinds() {
        let cases = [
            (AppError::NotFound("Tournament"), StatusCode::NOT_FOUND),
            (AppError::AccessDenied, StatusCode::FORBIDDEN),
            (AppError::AlreadyRegistered, StatusCode::CONFLICT),
            (
                AppError::RegistrationClosed("Tournament is completed"),
                StatusCode::CONFLICT,
            ),
            (AppError::LateRegistrationExpired, StatusCode::CONFLICT),
            (
                AppError::NothingToAssign("No registered players"),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Validation("Required fields are missing".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn not_found_message_names_the_entity() {
        assert_eq!(
            AppError::NotFound("Tournament").to_string(),
            "Tournament not found"
        );
    }
}
