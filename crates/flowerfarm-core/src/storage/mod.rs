//! Storage layer - SQLite + JSONL export
//!
//! Provides database management and migrations for the score store.
//!
//! # Architecture
//!
//! - `database`: Connection pool management and initialization
//! - `migrations`: Schema versioning and automatic migration
//! - `jsonl`: JSONL export/import for backups
//!
//! # Usage
//!
//! ```ignore
//! use flowerfarm_core::storage::{Database, DatabaseConfig};
//!
//! // Create an in-memory database for testing
//! let db = Database::in_memory().await?;
//!
//! // Or open a file
//! let db = Database::new(DatabaseConfig::with_path("scores.db")).await?;
//! ```

pub mod database;
pub mod jsonl;
pub mod migrations;

// Re-export commonly used types
pub use database::{Database, DatabaseConfig, default_database_path};
pub use jsonl::{EXPORT_FILE, ExportResult, ImportResult, export_scores, import_scores};
pub use migrations::{CURRENT_VERSION, MigrationStatus, migration_status, run_migrations};
