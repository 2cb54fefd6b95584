//! Score submission validation
//!
//! Turns loosely typed client input into a [`ScoreSubmission`].

use serde::Deserialize;
use serde_json::Value;

use crate::application::errors::{AppResult, ApplicationError};
use crate::domain::score::{Initials, ScoreSubmission};

const NOT_A_STRING: &str = "Not a valid string.";
const NOT_AN_INTEGER: &str = "A valid integer is required.";

/// Raw submission as a client sends it.
///
/// Fields stay untyped so shape problems can be reported per field. Anything
/// else in the body (`id`, `timestamp`, ...) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreInput {
    #[serde(default)]
    pub initials: Value,
    #[serde(default)]
    pub score: Value,
}

impl ScoreInput {
    pub fn new(initials: impl Into<Value>, score: impl Into<Value>) -> Self {
        Self {
            initials: initials.into(),
            score: score.into(),
        }
    }
}

/// Validator for score submissions
pub struct ScoreValidator;

impl ScoreValidator {
    /// Validate initials
    ///
    /// Rules:
    /// - Must be present and a string
    /// - Trimmed and uppercased, then exactly 3 letters A-Z
    pub fn validate_initials(value: &Value) -> AppResult<Initials> {
        let raw = match value {
            Value::Null => return Err(ApplicationError::required("initials")),
            Value::String(s) => s,
            _ => return Err(ApplicationError::validation("initials", NOT_A_STRING)),
        };

        Initials::parse(raw).map_err(ApplicationError::from)
    }

    /// Validate a score value
    ///
    /// Rules:
    /// - Must be present
    /// - A JSON integer, an integral float, or a string holding a base-10 integer
    /// - Must fit in 64 bits
    ///
    /// The sign is checked by [`ScoreSubmission::new`].
    pub fn validate_score(value: &Value) -> AppResult<i64> {
        let invalid = || ApplicationError::validation("score", NOT_AN_INTEGER);

        match value {
            Value::Null => Err(ApplicationError::required("score")),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i)
                } else if n.is_u64() {
                    Err(invalid())
                } else {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                        .ok_or_else(invalid)
                }
            }
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Validate all fields, initials first, stopping at the first failure
    pub fn validate_submission(input: &ScoreInput) -> AppResult<ScoreSubmission> {
        let initials = Self::validate_initials(&input.initials)?;
        let score = Self::validate_score(&input.score)?;
        ScoreSubmission::new(initials.as_str(), score).map_err(ApplicationError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::score::{INITIALS_MESSAGE, SCORE_MESSAGE};
    use serde_json::json;

    fn failure(input: ScoreInput) -> (String, String) {
        match ScoreValidator::validate_submission(&input).unwrap_err() {
            ApplicationError::Validation { field, message } => (field, message),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_submission() {
        let submission =
            ScoreValidator::validate_submission(&ScoreInput::new("abc", 1500)).unwrap();
        assert_eq!(submission.initials().as_str(), "ABC");
        assert_eq!(submission.score(), 1500);
    }

    #[test]
    fn test_score_as_string_or_integral_float() {
        assert_eq!(ScoreValidator::validate_score(&json!("42")).unwrap(), 42);
        assert_eq!(ScoreValidator::validate_score(&json!(" 7 ")).unwrap(), 7);
        assert_eq!(ScoreValidator::validate_score(&json!(100.0)).unwrap(), 100);
    }

    #[test]
    fn test_score_not_an_integer() {
        for bad in [json!(1.5), json!("ten"), json!(true), json!([1]), json!({"v": 1}), json!(u64::MAX)] {
            let (field, message) = failure(ScoreInput::new("ABC", bad.clone()));
            assert_eq!(field, "score", "input {bad}");
            assert_eq!(message, NOT_AN_INTEGER);
        }
    }

    #[test]
    fn test_negative_score() {
        let (field, message) = failure(ScoreInput::new("ABC", -10));
        assert_eq!(field, "score");
        assert_eq!(message, SCORE_MESSAGE);
    }

    #[test]
    fn test_bad_initials() {
        for bad in ["AB", "ABCD", "A1C", "", "a c", "ßa", "ﬀa"] {
            let (field, message) = failure(ScoreInput::new(bad, 10));
            assert_eq!(field, "initials");
            assert_eq!(message, INITIALS_MESSAGE);
        }
    }

    #[test]
    fn test_initials_not_a_string() {
        let (field, message) = failure(ScoreInput::new(123, 10));
        assert_eq!(field, "initials");
        assert_eq!(message, NOT_A_STRING);
    }

    #[test]
    fn test_missing_fields() {
        let (field, message) = failure(ScoreInput::default());
        assert_eq!(field, "initials");
        assert_eq!(message, "This field is required.");

        let (field, _) = failure(ScoreInput::new("ABC", Value::Null));
        assert_eq!(field, "score");
    }

    #[test]
    fn test_initials_checked_before_score() {
        let (field, _) = failure(ScoreInput::new("A", -1));
        assert_eq!(field, "initials");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let input: ScoreInput = serde_json::from_value(json!({
            "id": 99,
            "initials": "xyz",
            "score": 5,
            "timestamp": "2020-01-01T00:00:00Z"
        }))
        .unwrap();

        let submission = ScoreValidator::validate_submission(&input).unwrap();
        assert_eq!(submission.initials().as_str(), "XYZ");
    }
}
