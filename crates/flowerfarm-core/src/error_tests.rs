//! Error module tests

use crate::error::Error;

#[test]
fn test_validation_error() {
    let error = Error::validation("initials", "Initials must be exactly 3 uppercase letters");
    assert_eq!(error.code(), "E001");
    assert_eq!(error.suggestion(), None);
    assert!(error.is_client_error());
    assert_eq!(
        error.to_string(),
        "initials: Initials must be exactly 3 uppercase letters"
    );
}

#[test]
fn test_database_error() {
    let error = Error::DatabaseError(sqlx::Error::RowNotFound);
    assert_eq!(error.code(), "E400");
    assert!(!error.is_client_error());
    assert_eq!(error.suggestion(), Some("flowerfarm doctor".to_string()));
}

#[test]
fn test_parse_error() {
    let error = Error::Parse("Invalid timestamp 'yesterday'".to_string());
    assert_eq!(error.code(), "E401");
    assert!(!error.is_client_error());
    assert!(error.to_string().starts_with("Parse error"));
}

#[test]
fn test_import_failed_error() {
    let error = Error::ImportFailed {
        line: 7,
        reason: "missing field `score`".to_string(),
    };
    assert_eq!(error.code(), "E500");
    assert!(error.to_string().contains("line 7"));
    assert!(error.suggestion().is_some());
}

#[test]
fn test_io_error_is_transparent() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scores.jsonl missing");
    let error: Error = io.into();
    assert_eq!(error.code(), "E9999");
    assert_eq!(error.to_string(), "scores.jsonl missing");
}

#[test]
fn test_json_error() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json.into();
    assert_eq!(error.code(), "E9999");
    assert!(!error.is_client_error());
    assert_eq!(error.suggestion(), None);
}
