//! Application service layer
//!
//! This layer validates client input, orchestrates domain operations,
//! and provides the public API for the core functionality.

pub mod errors;
pub mod services;
pub mod validators;

pub use errors::{AppResult, ApplicationError};
pub use services::ScoreService;
pub use validators::{ScoreInput, ScoreValidator};
