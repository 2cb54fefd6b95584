//! Score repository for database operations
//!
//! Handles all database interactions for the `scores` table.

use super::entity::{Score, ScoreQuery, ScoreSubmission, format_timestamp, now, parse_timestamp};
use super::repository_trait::ScoreRepositoryTrait;
use crate::error::{Error, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Leaderboard ordering shared by every ranked query
const RANKING: &str = "ORDER BY score DESC, timestamp DESC, id DESC";

const RESTORE: &str =
    "INSERT OR IGNORE INTO scores (id, initials, score, timestamp) VALUES (?, ?, ?, ?)";

/// Repository for score database operations
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    pool: SqlitePool,
}

impl ScoreRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ScoreRepositoryTrait for ScoreRepository {
    async fn insert(&self, submission: &ScoreSubmission) -> Result<Score> {
        let timestamp = now();

        let result = sqlx::query("INSERT INTO scores (initials, score, timestamp) VALUES (?, ?, ?)")
            .bind(submission.initials().as_str())
            .bind(submission.score())
            .bind(format_timestamp(&timestamp))
            .execute(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        Ok(Score::from_submission(
            result.last_insert_rowid(),
            submission.clone(),
            timestamp,
        ))
    }

    async fn restore(&self, score: &Score) -> Result<bool> {
        let result = sqlx::query(RESTORE)
            .bind(score.id)
            .bind(&score.initials)
            .bind(score.score)
            .bind(format_timestamp(&score.timestamp))
            .execute(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        Ok(result.rows_affected() == 1)
    }

    async fn restore_all(&self, scores: &[Score]) -> Result<usize> {
        let mut tx = self.pool.begin().await.map_err(Error::DatabaseError)?;

        let mut inserted = 0;
        for score in scores {
            let result = sqlx::query(RESTORE)
                .bind(score.id)
                .bind(&score.initials)
                .bind(score.score)
                .bind(format_timestamp(&score.timestamp))
                .execute(&mut *tx)
                .await
                .map_err(Error::DatabaseError)?;
            inserted += result.rows_affected() as usize;
        }

        tx.commit().await.map_err(Error::DatabaseError)?;
        Ok(inserted)
    }

    async fn get(&self, id: i64) -> Result<Option<Score>> {
        let row: Option<ScoreRow> =
            sqlx::query_as("SELECT id, initials, score, timestamp FROM scores WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::DatabaseError)?;

        row.map(ScoreRow::into_score).transpose()
    }

    async fn top(&self, limit: u32) -> Result<Vec<Score>> {
        let rows: Vec<ScoreRow> = sqlx::query_as(&format!(
            "SELECT id, initials, score, timestamp FROM scores {RANKING} LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::DatabaseError)?;

        rows.into_iter().map(ScoreRow::into_score).collect()
    }

    async fn query(&self, query: &ScoreQuery) -> Result<Vec<Score>> {
        let pattern = query.initials.as_ref().map(|needle| format!("%{}%", needle));
        let since = query.since.as_ref().map(format_timestamp);

        let rows: Vec<ScoreRow> = sqlx::query_as(&format!(
            r#"
            SELECT id, initials, score, timestamp
            FROM scores
            WHERE (? IS NULL OR initials LIKE ?)
              AND (? IS NULL OR timestamp >= ?)
            {RANKING}
            LIMIT ?
            "#
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(&since)
        .bind(&since)
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(Error::DatabaseError)?;

        rows.into_iter().map(ScoreRow::into_score).collect()
    }

    async fn all(&self) -> Result<Vec<Score>> {
        let rows: Vec<ScoreRow> =
            sqlx::query_as("SELECT id, initials, score, timestamp FROM scores ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::DatabaseError)?;

        rows.into_iter().map(ScoreRow::into_score).collect()
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scores")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::DatabaseError)?;

        Ok(count)
    }
}

// ========== Row Types ==========

#[derive(Debug, sqlx::FromRow)]
struct ScoreRow {
    id: i64,
    initials: String,
    score: i64,
    timestamp: String,
}

impl ScoreRow {
    fn into_score(self) -> Result<Score> {
        let timestamp = parse_timestamp(&self.timestamp)
            .map_err(|e| Error::Parse(format!("Score {}: {}", self.id, e)))?;

        Ok(Score {
            id: self.id,
            initials: self.initials,
            score: self.score,
            timestamp,
        })
    }
}
