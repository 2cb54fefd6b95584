//! Application services
//!
//! Services that orchestrate domain operations and provide the public API.

pub mod score_service;

pub use score_service::ScoreService;
