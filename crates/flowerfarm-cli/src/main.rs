//! Flower Farm CLI - score API server and leaderboard tools

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use flowerfarm_core::api::{self, HealthStatus};
use flowerfarm_core::application::{ScoreInput, ScoreService};
use flowerfarm_core::config::Config;
use flowerfarm_core::domain::score::{ScoreQuery, format_timestamp, parse_timestamp};
use flowerfarm_core::storage::{self, Database, EXPORT_FILE};
use tracing::info;

#[derive(Parser)]
#[command(name = "flowerfarm")]
#[command(author, version, about = "Score submission and leaderboard API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// SQLite database file (overrides database.path)
    #[arg(long, global = true)]
    database: Option<PathBuf>,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API until interrupted
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Submit a score
    Submit {
        /// Three-letter initials
        initials: String,
        /// Non-negative score
        #[arg(allow_hyphen_values = true)]
        score: String,
    },

    /// Show the leaderboard
    Top,

    /// Browse stored scores
    Scores {
        /// Only initials containing this text
        #[arg(short, long)]
        initials: Option<String>,
        /// Only scores recorded at or after this time (RFC 3339 or YYYY-MM-DD)
        #[arg(short, long)]
        since: Option<String>,
        /// Maximum rows to show
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Export scores to JSONL
    Export {
        #[arg(default_value = EXPORT_FILE)]
        path: PathBuf,
    },

    /// Import scores from JSONL
    Import {
        #[arg(default_value = EXPORT_FILE)]
        path: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flowerfarm=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Config { action } = cli.command {
        return cmd_config(action, cli.quiet);
    }

    let mut config = Config::load()?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    let db = Database::open(&config.database).await?;

    let result = match cli.command {
        Commands::Serve { host, port } => cmd_serve(&db, config, host, port).await,
        Commands::Submit { initials, score } => {
            cmd_submit(&db, &config, &initials, &score, cli.format, cli.quiet).await
        }
        Commands::Top => cmd_top(&db, &config, cli.format, cli.quiet).await,
        Commands::Scores {
            initials,
            since,
            limit,
        } => cmd_scores(&db, initials, since.as_deref(), limit, cli.format, cli.quiet).await,
        Commands::Export { path } => cmd_export(&db, &path, cli.quiet).await,
        Commands::Import { path } => cmd_import(&db, &path, cli.quiet).await,
        Commands::Doctor => cmd_doctor(&db, &config, cli.format, cli.quiet).await,
        Commands::Config { .. } => Ok(()),
    };

    db.close().await;
    result
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_serve(
    db: &Database,
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let listener = api::bind(&config.server).await?;
    api::serve(listener, db, &config, shutdown_signal()).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}

async fn cmd_submit(
    db: &Database,
    config: &Config,
    initials: &str,
    score: &str,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let service = service(db, config);
    let stored = service.submit(&ScoreInput::new(initials, score)).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stored)?),
        OutputFormat::Text if quiet => println!("{}", stored.id),
        OutputFormat::Text => println!("Score submitted: {} (id {})", stored, stored.id),
    }
    Ok(())
}

async fn cmd_top(
    db: &Database,
    config: &Config,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let entries = service(db, config).leaderboard().await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        if !quiet {
            println!("No scores yet.");
            println!("\nSubmit one with: flowerfarm submit <initials> <score>");
        }
        return Ok(());
    }

    if !quiet {
        println!("Leaderboard:");
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "  {:>2}. {} {:>10}  {}",
            rank + 1,
            entry.initials,
            entry.score,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

async fn cmd_scores(
    db: &Database,
    initials: Option<String>,
    since: Option<&str>,
    limit: Option<u32>,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut query = ScoreQuery::default();
    if let Some(initials) = initials {
        query = query.initials(initials);
    }
    if let Some(since) = since {
        query = query.since(parse_since(since)?);
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let scores = ScoreService::from_database(db).browse(&query).await?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    if scores.is_empty() {
        if !quiet {
            println!("No matching scores.");
        }
        return Ok(());
    }

    for score in scores {
        println!(
            "  {:>6}  {} {:>10}  {}",
            score.id,
            score.initials,
            score.score,
            format_timestamp(&score.timestamp)
        );
    }
    Ok(())
}

/// Accept a full RFC 3339 timestamp or a bare date (midnight UTC)
fn parse_since(text: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(timestamp) = parse_timestamp(text) {
        return Ok(timestamp);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("Invalid --since value: {}", text))?;
    date.and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .with_context(|| format!("Invalid --since value: {}", text))
}

async fn cmd_export(db: &Database, path: &std::path::Path, quiet: bool) -> anyhow::Result<()> {
    let result = storage::export_scores(db, path).await?;
    if !quiet {
        println!(
            "Exported {} score(s) to {}",
            result.records,
            result.path.display()
        );
    }
    Ok(())
}

async fn cmd_import(db: &Database, path: &std::path::Path, quiet: bool) -> anyhow::Result<()> {
    let result = storage::import_scores(db, path).await?;
    if !quiet {
        println!(
            "Imported {} score(s), skipped {} already present",
            result.imported, result.skipped
        );
    }
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_file()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.list()? {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(
    db: &Database,
    config: &Config,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let config_path = Config::config_path().ok();
    let report = api::doctor(db, config_path.as_deref()).await;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !quiet {
        println!("{} Health Check", config.service.name);
        println!("=======================");
        println!();
    }

    for check in &report.checks {
        let marker = match check.status {
            HealthStatus::Ok => "[OK]",
            HealthStatus::Warning => "[--]",
            HealthStatus::Error => "[!!]",
        };
        println!(
            "{} {}: {}",
            marker,
            check.name,
            check.message.as_deref().unwrap_or("")
        );
    }

    if report.overall_status != HealthStatus::Error {
        let count = service(db, config).count().await?;
        println!("     Scores: {}", count);
    }

    if !quiet {
        println!();
        match report.overall_status {
            HealthStatus::Ok => println!("All checks passed!"),
            HealthStatus::Warning => println!("Checks passed with warnings."),
            HealthStatus::Error => println!("Some checks failed. See above for details."),
        }
    }
    Ok(())
}

fn service(db: &Database, config: &Config) -> ScoreService {
    ScoreService::from_database(db).with_leaderboard_size(config.leaderboard.size)
}
