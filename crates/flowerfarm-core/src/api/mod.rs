//! HTTP API
//!
//! - `envelope`: response wrappers and the error-to-status mapping
//! - `router`: axum routes for scores, leaderboard, and health
//! - `server`: listener binding and graceful shutdown
//! - `health`: diagnostics for the `doctor` command
//!
//! Handlers receive their [`ScoreService`](crate::application::ScoreService)
//! through [`AppState`]; there is no process-wide database handle.

pub mod envelope;
pub mod health;
pub mod router;
pub mod server;

pub use envelope::{ApiError, ApiResponse, HealthResponse};
pub use health::{HealthCheck, HealthReport, HealthStatus, doctor};
pub use router::{AppState, build_router, create_cors_layer, routes};
pub use server::{bind, serve};
