use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    routing::{delete, get, post, put},
    Router,
};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::routes::{auth, players, profile, rating, registrations, tournaments};
use crate::state::AppState;

/// Build the Axum router: health probe, the JSON API, and the usual
/// middleware stack.
pub fn build_router(state: AppState) -> Router {
    // Rate limiting on login: 1 token every 6 seconds, burst of 10.
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(6)
        .burst_size(10)
        .finish()
        .unwrap();

    let rate_limited_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/telegram", post(auth::telegram_login))
        .layer(GovernorLayer::new(Arc::new(governor_conf)));

    Router::new()
        // Simple liveness check; also proves DB connectivity.
        .route("/health", get(health))
        .route(
            "/api/admin/players",
            get(players::list).post(players::create),
        )
        .route("/api/admin/players/{id}", delete(players::remove))
        .route(
            "/api/tournaments",
            get(tournaments::list).post(tournaments::create),
        )
        .route(
            "/api/tournaments/{id}",
            get(tournaments::detail)
                .put(tournaments::update)
                .delete(tournaments::remove),
        )
        .route("/api/tournaments/{id}/start", post(tournaments::start))
        .route(
            "/api/tournaments/{id}/close-late-reg",
            post(tournaments::close_late_reg),
        )
        .route("/api/tournaments/{id}/complete", post(tournaments::complete))
        .route(
            "/api/tournaments/{id}/update-chips",
            post(tournaments::update_chips),
        )
        .route(
            "/api/tournaments/{id}/seating",
            post(tournaments::assign_tables),
        )
        .route("/api/tournaments/{id}/tables", get(tournaments::tables))
        .route("/api/register", post(registrations::register))
        .route("/api/rating", get(rating::list).post(rating::create))
        .route(
            "/api/rating/{id}",
            put(rating::update).delete(rating::remove),
        )
        .route("/api/rating/player/{handle}", get(rating::by_handle))
        .route("/api/users/{id}/profile", get(profile::by_id))
        .route(
            "/api/users/telegram/{handle}/profile",
            get(profile::by_telegram),
        )
        .merge(rate_limited_routes)
        .with_state(state)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer({
            let allowed_origins = std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string());

            let origins: Vec<HeaderValue> = allowed_origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        })
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&state.db).await?;
    Ok("ok")
}
