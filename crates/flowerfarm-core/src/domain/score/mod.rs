//! Score domain module
//!
//! A score is a player's three-letter initials plus a non-negative points
//! total, stamped by the store when it is inserted. Scores are never updated
//! or deleted.
//!
//! # Architecture
//!
//! - **Entities**: `Score`, `LeaderboardEntry`, `Initials`, `ScoreSubmission`
//! - **Repository**: `ScoreRepository` (SQLite) behind `ScoreRepositoryTrait`
//!
//! # Ordering
//!
//! Every listing is ranked by `score DESC, timestamp DESC`, with `id DESC`
//! breaking ties between rows stamped in the same microsecond.
//!
//! # Example
//!
//! ```ignore
//! use flowerfarm_core::domain::score::{ScoreRepository, ScoreRepositoryTrait, ScoreSubmission};
//!
//! let repo = ScoreRepository::new(db.pool().clone());
//! let stored = repo.insert(&ScoreSubmission::new("abc", 120)?).await?;
//! assert_eq!(stored.initials, "ABC");
//!
//! let top = repo.top(10).await?;
//! ```

pub mod entity;
pub mod repository;
pub mod repository_trait;

pub use entity::{
    DEFAULT_QUERY_LIMIT, INITIALS_MESSAGE, Initials, LeaderboardEntry, SCORE_MESSAGE, Score,
    ScoreQuery, ScoreSubmission, format_timestamp, now, parse_timestamp,
};
pub use repository::ScoreRepository;
pub use repository_trait::ScoreRepositoryTrait;
