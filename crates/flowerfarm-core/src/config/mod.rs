//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default number of entries on the leaderboard
pub const DEFAULT_LEADERBOARD_SIZE: u32 = 10;

/// Largest leaderboard a config may ask for
pub const MAX_LEADERBOARD_SIZE: u32 = 100;

/// Flower Farm configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub leaderboard: LeaderboardConfig,
    pub service: ServiceConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Shown in the health probe as "<name> API is running"
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: crate::storage::database::default_database_path(),
            max_connections: 5,
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "Flower Farm".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}


impl Config {
    /// Configuration keys accepted by `get` and `set`
    pub const KEYS: &'static [&'static str] = &[
        "server.host",
        "server.port",
        "database.path",
        "database.max_connections",
        "leaderboard.size",
        "service.name",
        "cors.allowed_origins",
    ];

    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("FLOWERFARM_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("flowerfarm")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or fall back to defaults if it doesn't exist.
    /// Environment overrides are applied on top.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load only what the config file says, ignoring the environment.
    /// Used by `config set` so overrides are never written back.
    pub fn load_file() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply `FLOWERFARM_HOST`, `FLOWERFARM_PORT` and `FLOWERFARM_DATABASE`
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(host) = env::var("FLOWERFARM_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("FLOWERFARM_PORT") {
            self.set("server.port", &port)
                .context("Invalid FLOWERFARM_PORT")?;
        }
        if let Ok(path) = env::var("FLOWERFARM_DATABASE") {
            self.database.path = PathBuf::from(path);
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=MAX_LEADERBOARD_SIZE).contains(&self.leaderboard.size) {
            return Err(anyhow!(
                "Leaderboard size must be between 1 and {}",
                MAX_LEADERBOARD_SIZE
            ));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be at least 1"));
        }
        if self.service.name.trim().is_empty() {
            return Err(anyhow!("service.name cannot be empty"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "server.host" => Ok(self.server.host.clone()),
            "server.port" => Ok(self.server.port.to_string()),
            "database.path" => Ok(self.database.path.display().to_string()),
            "database.max_connections" => Ok(self.database.max_connections.to_string()),
            "leaderboard.size" => Ok(self.leaderboard.size.to_string()),
            "service.name" => Ok(self.service.name.clone()),
            "cors.allowed_origins" => Ok(self.cors.allowed_origins.join(", ")),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `flowerfarm config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "server.host" => {
                self.server.host = value.to_string();
            }
            "server.port" => {
                self.server.port = value
                    .parse()
                    .with_context(|| format!("Invalid port value: {}", value))?;
            }
            "database.path" => {
                self.database.path = PathBuf::from(value);
            }
            "database.max_connections" => {
                let max: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid max_connections value: {}", value))?;
                if max == 0 {
                    return Err(anyhow!("database.max_connections must be at least 1"));
                }
                self.database.max_connections = max;
            }
            "leaderboard.size" => {
                let size: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid leaderboard size: {}", value))?;
                if !(1..=MAX_LEADERBOARD_SIZE).contains(&size) {
                    return Err(anyhow!(
                        "Leaderboard size must be between 1 and {}",
                        MAX_LEADERBOARD_SIZE
                    ));
                }
                self.leaderboard.size = size;
            }
            "service.name" => {
                if value.trim().is_empty() {
                    return Err(anyhow!("service.name cannot be empty"));
                }
                self.service.name = value.trim().to_string();
            }
            "cors.allowed_origins" => {
                self.cors.allowed_origins = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `flowerfarm config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        Self::KEYS
            .iter()
            .map(|key| Ok((key.to_string(), self.get(key)?)))
            .collect()
    }
}
