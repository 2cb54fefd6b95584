//! Flower Farm Core Library
//!
//! This crate provides the core functionality for the Flower Farm score
//! service, including:
//! - Score domain (initials, submissions, ranking)
//! - Application services and input validation
//! - Storage (SQLite + JSONL export)
//! - HTTP API (submission, leaderboard, health)
//! - Configuration with file persistence

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::application::{ApplicationError, ScoreInput, ScoreService};
    pub use crate::config::Config;
    pub use crate::domain::score::{LeaderboardEntry, Score, ScoreQuery, ScoreSubmission};
    pub use crate::error::{Error, Result};
    pub use crate::storage::Database;
}

#[cfg(test)]
mod error_tests;
