//! Service configuration management
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional TOML file, then `RANKINGS_*` environment variables (a `.env`
//! file in the working directory is loaded first).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rank_aggregator::{AggregatorConfig, SeasonCalendar};
use rank_sources::SourcesConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Season calendar
    pub season: SeasonConfig,

    /// Ranking source URLs and HTTP client settings
    pub sources: SourcesConfig,

    /// Fetch concurrency
    pub aggregator: AggregatorConfig,

    /// Roster persistence
    pub roster: RosterConfig,

    /// Service-level settings
    pub service: ServiceSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonConfig {
    /// Tuesday before week 1 (YYYY-MM-DD)
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// JSON roster file, created with the default roster if missing
    pub path: PathBuf,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Enable development mode (debug logging, error details in responses)
    pub development_mode: bool,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5050 }
    }
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self { start_date: SeasonCalendar::default().season_start() }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("./data/players.json") }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { development_mode: false, shutdown_timeout_secs: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

impl ServiceConfig {
    /// Socket address the HTTP server binds to
    pub fn server_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid server host: {}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn calendar(&self) -> SeasonCalendar {
        SeasonCalendar::new(self.season.start_date)
    }

    /// Source settings with the season year taken from the season start date
    pub fn sources(&self) -> SourcesConfig {
        SourcesConfig { season: self.calendar().season_year(), ..self.sources.clone() }
    }

    /// Log level after development mode is applied
    pub fn effective_log_level(&self) -> &str {
        if self.service.development_mode && self.logging.level == "info" {
            "debug"
        } else {
            &self.logging.level
        }
    }
}

/// Load configuration from an optional file and the environment
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    dotenv::dotenv().ok();

    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<ServiceConfig> {
    tracing::debug!("Loading configuration from file: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Apply environment overrides; `lookup` returns the value of a variable
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("RANKINGS_HOST") {
        config.server.host = host;
    }

    // PORT is what most hosting platforms set
    if let Some(port) = lookup("RANKINGS_PORT").or_else(|| lookup("PORT")) {
        config.server.port = port.parse().with_context(|| format!("Invalid port: {}", port))?;
    }

    if let Some(start) = lookup("RANKINGS_SEASON_START") {
        config.season.start_date = start
            .parse()
            .with_context(|| format!("Invalid season start date: {}", start))?;
    }

    if let Some(path) = lookup("RANKINGS_ROSTER_PATH") {
        config.roster.path = PathBuf::from(path);
    }

    if let Some(timeout) = lookup("RANKINGS_SOURCE_TIMEOUT_SECS") {
        config.sources.timeout_secs =
            timeout.parse().with_context(|| format!("Invalid source timeout: {}", timeout))?;
    }

    if let Some(level) = lookup("RANKINGS_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("RANKINGS_LOG_FORMAT") {
        config.logging.format = format;
    }

    if let Some(dev_mode) = lookup("RANKINGS_DEV_MODE") {
        config.service.development_mode = dev_mode.parse().unwrap_or(false);
    }

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    config.server_addr()?;

    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow::anyhow!("Invalid log level: {}", config.logging.level)),
    }

    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => return Err(anyhow::anyhow!("Invalid log format: {}", config.logging.format)),
    }

    if config.sources.timeout_secs == 0 {
        return Err(anyhow::anyhow!("Source timeout must be at least one second"));
    }

    if config.roster.path.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("Roster path must not be empty"));
    }

    Ok(())
}
