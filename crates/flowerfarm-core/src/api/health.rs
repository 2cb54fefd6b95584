//! Diagnostics for the `doctor` command
//!
//! The HTTP health probe lives in the router; this module checks the
//! pieces an operator can fix: the database, its schema, and the config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::storage::Database;

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
}

/// Health status, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Warning,
    Error,
}

/// Overall system health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub timestamp: String,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: Some(message.into()),
        }
    }
}

/// Run all health checks
pub async fn doctor(db: &Database, config_path: Option<&Path>) -> HealthReport {
    let checks = vec![
        check_database(db).await,
        check_schema(db).await,
        check_config(config_path),
    ];

    let overall_status = checks
        .iter()
        .map(|c| c.status)
        .max()
        .unwrap_or(HealthStatus::Ok);

    HealthReport {
        overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

async fn check_database(db: &Database) -> HealthCheck {
    match db.health_check().await {
        Ok(()) => HealthCheck::new(
            "Database",
            HealthStatus::Ok,
            format!("Connected at {}", db.path().display()),
        ),
        Err(e) => HealthCheck::new(
            "Database",
            HealthStatus::Error,
            format!("Query failed: {}", e),
        ),
    }
}

async fn check_schema(db: &Database) -> HealthCheck {
    match db.migration_status().await {
        Ok(status) if !status.needs_migration => HealthCheck::new(
            "Schema",
            HealthStatus::Ok,
            format!("Version {}", status.current_version),
        ),
        Ok(status) => HealthCheck::new(
            "Schema",
            HealthStatus::Warning,
            format!(
                "Version {} of {}; migrations pending",
                status.current_version, status.target_version
            ),
        ),
        Err(e) => HealthCheck::new(
            "Schema",
            HealthStatus::Error,
            format!("Could not read version: {}", e),
        ),
    }
}

fn check_config(path: Option<&Path>) -> HealthCheck {
    match path {
        Some(path) if path.exists() => HealthCheck::new(
            "Configuration",
            HealthStatus::Ok,
            format!("Found at {}", path.display()),
        ),
        Some(path) => HealthCheck::new(
            "Configuration",
            HealthStatus::Warning,
            format!("Not found at {} (using defaults)", path.display()),
        ),
        None => HealthCheck::new(
            "Configuration",
            HealthStatus::Warning,
            "Could not determine config directory",
        ),
    }
}
