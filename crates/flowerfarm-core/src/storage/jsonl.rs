//! JSONL export/import for backups
//!
//! One score per line, in id order, so two exports of the same database
//! produce identical files and diffs stay small:
//!
//! ```text
//! {"id":1,"initials":"ABC","score":120,"timestamp":"2024-06-01T12:00:00.000000Z"}
//! {"id":2,"initials":"XYZ","score":90,"timestamp":"2024-06-01T12:03:11.512000Z"}
//! ```
//!
//! Import keeps ids and timestamps, skips ids already present, and checks
//! every record against the submission rules before anything is written.
//! The rows are then stored in a single transaction.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::Result;
use crate::domain::score::{Score, ScoreRepository, ScoreRepositoryTrait, ScoreSubmission};
use crate::error::Error;
use crate::storage::Database;

/// Default export file name
pub const EXPORT_FILE: &str = "scores.jsonl";

/// Result of an export operation
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// File that was written
    pub path: PathBuf,
    /// Number of scores written
    pub records: usize,
}

/// Result of an import operation
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Scores inserted
    pub imported: usize,
    /// Scores skipped because their id already existed
    pub skipped: usize,
}

/// Export every stored score to `path`
pub async fn export_scores(db: &Database, path: &Path) -> Result<ExportResult> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
    }

    let scores = ScoreRepository::new(db.pool().clone()).all().await?;

    let file = File::create(path).map_err(Error::Io)?;
    let mut writer = BufWriter::new(file);
    for score in &scores {
        serde_json::to_writer(&mut writer, score)?;
        writer.write_all(b"\n").map_err(Error::Io)?;
    }
    writer.flush().map_err(Error::Io)?;

    tracing::info!(path = %path.display(), records = scores.len(), "Exported scores");

    Ok(ExportResult {
        path: path.to_path_buf(),
        records: scores.len(),
    })
}

/// Import scores from a file written by [`export_scores`]
pub async fn import_scores(db: &Database, path: &Path) -> Result<ImportResult> {
    let file = File::open(path).map_err(Error::Io)?;
    let scores = read_scores(BufReader::new(file))?;

    let imported = ScoreRepository::new(db.pool().clone())
        .restore_all(&scores)
        .await?;
    let result = ImportResult {
        imported,
        skipped: scores.len() - imported,
    };

    tracing::info!(
        path = %path.display(),
        imported = result.imported,
        skipped = result.skipped,
        "Imported scores"
    );
    Ok(result)
}

/// Parse and check every line before any of them is stored
fn read_scores<R: BufRead>(reader: R) -> Result<Vec<Score>> {
    let mut scores = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(Error::Io)?;
        if line.trim().is_empty() {
            continue;
        }

        let mut score: Score = serde_json::from_str(&line).map_err(|e| Error::ImportFailed {
            line: line_no,
            reason: e.to_string(),
        })?;

        let checked =
            ScoreSubmission::new(&score.initials, score.score).map_err(|e| Error::ImportFailed {
                line: line_no,
                reason: e.to_string(),
            })?;
        score.initials = checked.initials().to_string();

        scores.push(score);
    }

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> Database {
        let db = Database::in_memory().await.unwrap();
        let repo = ScoreRepository::new(db.pool().clone());
        for (initials, score) in [("abc", 120), ("xyz", 90), ("mno", 300)] {
            repo.insert(&ScoreSubmission::new(initials, score).unwrap())
                .await
                .unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_export_then_import_into_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup").join(EXPORT_FILE);

        let source = seeded().await;
        let exported = export_scores(&source, &path).await.unwrap();
        assert_eq!(exported.records, 3);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.lines().next().unwrap().contains("\"initials\":\"ABC\""));

        let target = Database::in_memory().await.unwrap();
        let imported = import_scores(&target, &path).await.unwrap();
        assert_eq!(imported.imported, 3);
        assert_eq!(imported.skipped, 0);

        let original = ScoreRepository::new(source.pool().clone()).all().await.unwrap();
        let restored = ScoreRepository::new(target.pool().clone()).all().await.unwrap();
        assert_eq!(original, restored);
    }

    #[tokio::test]
    async fn test_import_skips_existing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE);

        let db = seeded().await;
        export_scores(&db, &path).await.unwrap();

        let again = import_scores(&db, &path).await.unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.skipped, 3);
    }

    #[test]
    fn test_read_scores_rejects_invalid_record() {
        let input = concat!(
            "{\"id\":1,\"initials\":\"ABC\",\"score\":1,\"timestamp\":\"2024-06-01T12:00:00Z\"}\n",
            "\n",
            "{\"id\":2,\"initials\":\"ABC\",\"score\":-4,\"timestamp\":\"2024-06-01T12:00:00Z\"}\n",
        );

        match read_scores(input.as_bytes()) {
            Err(Error::ImportFailed { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("non-negative"));
            }
            other => panic!("expected import failure, got {other:?}"),
        }
    }

    #[test]
    fn test_read_scores_rejects_malformed_json() {
        let err = read_scores("not json\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::ImportFailed { line: 1, .. }));
    }

    #[test]
    fn test_read_scores_normalizes_initials() {
        let input = "{\"id\":9,\"initials\":\"abc\",\"score\":5,\"timestamp\":\"2024-06-01T12:00:00Z\"}\n";
        let scores = read_scores(input.as_bytes()).unwrap();
        assert_eq!(scores[0].initials, "ABC");
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let db = Database::in_memory().await.unwrap();
        let err = import_scores(&db, Path::new("/nonexistent/scores.jsonl"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
