//! HTTP routes for score submission, the leaderboard, and the health probe
//!
//! Routes answer with and without a trailing slash, both at the root and
//! under `/api`.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderName, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::envelope::{
    ApiError, ApiResponse, HealthResponse, LEADERBOARD_MESSAGE, SUBMITTED_MESSAGE,
};
use crate::application::{ScoreInput, ScoreService};
use crate::config::{Config, CorsConfig};
use crate::domain::score::{LeaderboardEntry, Score};
use crate::storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub scores: ScoreService,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(scores: ScoreService, service_name: impl Into<Arc<str>>) -> Self {
        Self {
            scores,
            service_name: service_name.into(),
        }
    }

    /// State for a database using the configured leaderboard size and service name
    pub fn from_config(db: &Database, config: &Config) -> Self {
        let scores =
            ScoreService::from_database(db).with_leaderboard_size(config.leaderboard.size);
        Self::new(scores, config.service.name.as_str())
    }
}

/// Build the full router with tracing and CORS layers
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    routes()
        .layer(create_cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Score routes mounted at `/` and `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(score_routes())
        .nest("/api", score_routes())
}

fn score_routes() -> Router<AppState> {
    Router::new()
        .route("/scores/", post(submit_score))
        .route("/scores", post(submit_score))
        .route("/scores/top/", get(leaderboard))
        .route("/scores/top", get(leaderboard))
        .route("/health/", get(health_check))
        .route("/health", get(health_check))
}

/// Create CORS layer from config
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([HeaderName::from_static("content-type")]);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

async fn submit_score(
    State(state): State<AppState>,
    body: Result<Json<ScoreInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Score>>), ApiError> {
    let Json(input) = body?;
    let score = state.scores.submit(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SUBMITTED_MESSAGE, score)),
    ))
}

async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, ApiError> {
    let entries = state.scores.leaderboard().await?;
    Ok(Json(ApiResponse::ok(LEADERBOARD_MESSAGE, entries)))
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let count = state.scores.count().await?;

    Ok(Json(HealthResponse {
        success: true,
        message: format!("{} API is running", state.service_name),
        timestamp: count,
    }))
}
