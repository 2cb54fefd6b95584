//! Score service
//!
//! Validates and stores submissions and serves the leaderboard. The store is
//! injected as a repository handle; the service keeps no other state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::errors::AppResult;
use crate::application::validators::{ScoreInput, ScoreValidator};
use crate::config::DEFAULT_LEADERBOARD_SIZE;
use crate::domain::score::{
    LeaderboardEntry, Score, ScoreQuery, ScoreRepository, ScoreRepositoryTrait, ScoreSubmission,
};
use crate::storage::Database;

/// Application service for score submission and ranking
#[derive(Clone)]
pub struct ScoreService {
    repository: Arc<dyn ScoreRepositoryTrait>,
    leaderboard_size: u32,
}

impl ScoreService {
    /// Create a service over any score repository
    pub fn new(repository: Arc<dyn ScoreRepositoryTrait>) -> Self {
        Self {
            repository,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }

    /// Create a service backed by the SQLite repository
    pub fn from_database(db: &Database) -> Self {
        Self::new(Arc::new(ScoreRepository::new(db.pool().clone())))
    }

    /// Override how many entries the leaderboard shows
    pub fn with_leaderboard_size(mut self, size: u32) -> Self {
        self.leaderboard_size = size;
        self
    }

    pub fn leaderboard_size(&self) -> u32 {
        self.leaderboard_size
    }

    /// Validate raw input and store it
    pub async fn submit(&self, input: &ScoreInput) -> AppResult<Score> {
        let submission = match ScoreValidator::validate_submission(input) {
            Ok(submission) => submission,
            Err(e) => {
                warn!(error = %e, "Rejected score submission");
                return Err(e);
            }
        };

        self.record(&submission).await
    }

    /// Store an already validated submission
    pub async fn record(&self, submission: &ScoreSubmission) -> AppResult<Score> {
        let score = self.repository.insert(submission).await?;

        info!(
            id = score.id,
            initials = %score.initials,
            score = score.score,
            "Score submitted"
        );
        Ok(score)
    }

    /// The highest-ranked scores, best first
    pub async fn leaderboard(&self) -> AppResult<Vec<LeaderboardEntry>> {
        let top = self.repository.top(self.leaderboard_size).await?;
        debug!(entries = top.len(), "Leaderboard retrieved");
        Ok(top.into_iter().map(LeaderboardEntry::from).collect())
    }

    /// Ranked full records matching operator filters
    pub async fn browse(&self, query: &ScoreQuery) -> AppResult<Vec<Score>> {
        Ok(self.repository.query(query).await?)
    }

    /// Number of stored scores
    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.repository.count().await?)
    }

    /// Access the underlying repository
    pub fn repository(&self) -> &Arc<dyn ScoreRepositoryTrait> {
        &self.repository
    }
}
