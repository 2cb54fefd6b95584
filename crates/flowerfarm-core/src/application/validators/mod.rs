//! Application validators
//!
//! Input validation for application operations.

pub mod score_validator;

pub use score_validator::{ScoreInput, ScoreValidator};
