//! Repository trait for score persistence
//!
//! The trait abstracts over storage backends so the service and HTTP layer
//! receive the store as an explicit handle.

use async_trait::async_trait;

use crate::error::Result;

use super::entity::{Score, ScoreQuery, ScoreSubmission};

/// Repository trait for score persistence.
///
/// There is deliberately no update or delete: stored scores are immutable.
#[async_trait]
pub trait ScoreRepositoryTrait: Send + Sync {
    /// Store a validated submission, assigning its id and timestamp
    async fn insert(&self, submission: &ScoreSubmission) -> Result<Score>;

    /// Re-insert a previously exported score, keeping its id and timestamp.
    /// Returns false when a row with that id already exists.
    async fn restore(&self, score: &Score) -> Result<bool>;

    /// Restore a batch in one transaction; nothing is kept if any row fails.
    /// Returns how many rows were inserted.
    async fn restore_all(&self, scores: &[Score]) -> Result<usize>;

    /// Get a score by id
    async fn get(&self, id: i64) -> Result<Option<Score>>;

    /// The `limit` highest-ranked scores
    async fn top(&self, limit: u32) -> Result<Vec<Score>>;

    /// Ranked scores matching the query filters
    async fn query(&self, query: &ScoreQuery) -> Result<Vec<Score>>;

    /// Every score in id order
    async fn all(&self) -> Result<Vec<Score>>;

    /// Number of stored scores
    async fn count(&self) -> Result<i64>;
}
