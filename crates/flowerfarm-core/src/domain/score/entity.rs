//! Score entity and related value types

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Message reported when initials fail validation
pub const INITIALS_MESSAGE: &str = "Initials must be exactly 3 uppercase letters";

/// Message reported when a score is negative
pub const SCORE_MESSAGE: &str = "Score must be non-negative";

/// Number of letters in a player's initials
pub const INITIALS_LEN: usize = 3;

/// Default row limit for operator browsing
pub const DEFAULT_QUERY_LIMIT: u32 = 50;

/// Player initials: exactly three letters `A`-`Z`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Initials(String);

impl Initials {
    /// Normalize raw input and check it.
    ///
    /// Surrounding whitespace is dropped and ASCII letters uppercased before
    /// the three-letter rule is applied, so `" abc"` is accepted as `ABC`.
    /// Non-ASCII characters are left as they are and fail the rule; full
    /// Unicode case mapping would turn `"ßa"` into `"SSA"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_uppercase();

        let valid = normalized.len() == INITIALS_LEN
            && normalized.bytes().all(|b| b.is_ascii_uppercase());
        if !valid {
            return Err(Error::validation("initials", INITIALS_MESSAGE));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A checked, not yet stored, score.
///
/// The only way to build one is [`ScoreSubmission::new`], so anything that
/// reaches the repository already satisfies the initials and score rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    initials: Initials,
    score: i64,
}

impl ScoreSubmission {
    /// Validate initials first, then the score; the first failure wins.
    pub fn new(initials: &str, score: i64) -> Result<Self> {
        let initials = Initials::parse(initials)?;
        if score < 0 {
            return Err(Error::validation("score", SCORE_MESSAGE));
        }
        Ok(Self { initials, score })
    }

    pub fn initials(&self) -> &Initials {
        &self.initials
    }

    pub fn score(&self) -> i64 {
        self.score
    }
}

/// A stored score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Assigned by the store on insert
    pub id: i64,
    /// Uppercase three-letter initials
    pub initials: String,
    /// Points, never negative
    pub score: i64,
    /// When the store accepted the score
    pub timestamp: DateTime<Utc>,
}

impl Score {
    /// Stamp a submission with its id and insertion time
    pub fn from_submission(id: i64, submission: ScoreSubmission, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            initials: submission.initials.into_inner(),
            score: submission.score,
            timestamp,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} points", self.initials, self.score)
    }
}

/// Leaderboard projection of a score; the id stays private
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub initials: String,
    pub score: i64,
    pub timestamp: DateTime<Utc>,
}

impl From<Score> for LeaderboardEntry {
    fn from(score: Score) -> Self {
        Self {
            initials: score.initials,
            score: score.score,
            timestamp: score.timestamp,
        }
    }
}

/// Filters for browsing stored scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreQuery {
    /// Case-insensitive substring of the initials
    pub initials: Option<String>,
    /// Only scores stamped at or after this instant
    pub since: Option<DateTime<Utc>>,
    /// Maximum rows returned
    pub limit: u32,
}

impl Default for ScoreQuery {
    fn default() -> Self {
        Self {
            initials: None,
            since: None,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

impl ScoreQuery {
    pub fn initials(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into().trim().to_uppercase();
        self.initials = (!needle.is_empty()).then_some(needle);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Current time at the precision the store keeps
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 text, so string order matches time order
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp as written by [`format_timestamp`] (any RFC 3339 offset is accepted)
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("Invalid timestamp '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_parts(err: Error) -> (String, String) {
        match err {
            Error::Validation { field, message } => (field, message),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_initials_uppercased() {
        assert_eq!(Initials::parse("abc").unwrap().as_str(), "ABC");
        assert_eq!(Initials::parse("aBc").unwrap().as_str(), "ABC");
        assert_eq!(Initials::parse("XYZ").unwrap().as_str(), "XYZ");
    }

    #[test]
    fn test_initials_trimmed() {
        assert_eq!(Initials::parse("  jdk ").unwrap().as_str(), "JDK");
    }

    #[test]
    fn test_initials_rejected() {
        for bad in ["", "AB", "ABCD", "A1C", "A C", "AB-", "ÀBC", "ßAB", "123", "ßa", "ﬀa", "àbc"] {
            let (field, message) = validation_parts(Initials::parse(bad).unwrap_err());
            assert_eq!(field, "initials", "input {bad:?}");
            assert_eq!(message, INITIALS_MESSAGE);
        }
    }

    #[test]
    fn test_submission_rejects_negative_score() {
        let (field, message) = validation_parts(ScoreSubmission::new("ABC", -1).unwrap_err());
        assert_eq!(field, "score");
        assert_eq!(message, SCORE_MESSAGE);
    }

    #[test]
    fn test_submission_checks_initials_first() {
        let (field, _) = validation_parts(ScoreSubmission::new("no", -5).unwrap_err());
        assert_eq!(field, "initials");
    }

    #[test]
    fn test_submission_accepts_zero_and_large_scores() {
        assert_eq!(ScoreSubmission::new("abc", 0).unwrap().score(), 0);
        assert_eq!(ScoreSubmission::new("abc", i64::MAX).unwrap().score(), i64::MAX);
    }

    #[test]
    fn test_leaderboard_entry_drops_id() {
        let score = Score::from_submission(7, ScoreSubmission::new("abc", 42).unwrap(), now());
        let entry = LeaderboardEntry::from(score.clone());
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["initials"], "ABC");
        assert_eq!(json["score"], 42);
        assert_eq!(entry.timestamp, score.timestamp);
    }

    #[test]
    fn test_score_display() {
        let score = Score::from_submission(1, ScoreSubmission::new("abc", 300).unwrap(), now());
        assert_eq!(score.to_string(), "ABC: 300 points");
    }

    #[test]
    fn test_timestamp_text_round_trip() {
        let ts = now();
        let text = format_timestamp(&ts);
        assert!(text.ends_with('Z'));
        assert_eq!(text.len(), "2024-01-01T00:00:00.000000Z".len());
        assert_eq!(parse_timestamp(&text).unwrap(), ts);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(parse_timestamp("yesterday"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_query_builder_normalizes_needle() {
        let query = ScoreQuery::default().initials(" ab ").limit(5);
        assert_eq!(query.initials.as_deref(), Some("AB"));
        assert_eq!(query.limit, 5);

        let blank = ScoreQuery::default().initials("   ");
        assert!(blank.initials.is_none());
    }
}
