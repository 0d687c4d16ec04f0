//! Application settings and configuration

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Database configuration
    pub database: DatabaseSettings,
    /// Notification channel configuration
    #[serde(default)]
    pub notification: NotificationSettings,
    /// Per-check tunables
    #[serde(default)]
    pub checks: CheckSettings,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgresql://localhost/data_checker".into())
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
        }
    }
}

/// Notification channel settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Enable outbound notifications
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// HTTP mail gateway endpoint
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Sender address
    #[serde(default = "default_from")]
    pub from: String,
    /// Recipient list for check alerts
    #[serde(default)]
    pub recipients: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_gateway_url() -> String {
    "http://localhost:8025/api/send".to_string()
}

fn default_from() -> String {
    "data-checker@localhost".to_string()
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            gateway_url: default_gateway_url(),
            from: default_from(),
            recipients: vec![],
        }
    }
}

/// Per-check settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Candle tick-count check
    #[serde(default)]
    pub candle_tick_count: CandleTickCountSettings,
}

/// Settings for the candle tick-count check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleTickCountSettings {
    /// Tick-count thresholds; a candle below any of them is a violation
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<i64>,
    /// Default window start, days before now
    #[serde(default = "default_lookback_days")]
    pub default_lookback_days: i64,
    /// Default window end, days before now
    #[serde(default = "default_lag_days")]
    pub default_lag_days: i64,
}

fn default_thresholds() -> Vec<i64> {
    vec![1150]
}

fn default_lookback_days() -> i64 {
    7
}

fn default_lag_days() -> i64 {
    1
}

impl Default for CandleTickCountSettings {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
            default_lookback_days: default_lookback_days(),
            default_lag_days: default_lag_days(),
        }
    }
}

impl Settings {
    /// Load settings from configuration files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_prefix("DATA_CHECKER")
    }

    /// Load settings with a custom environment variable prefix
    pub fn load_with_prefix(env_prefix: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config_dir = Self::config_dir();

        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Add environment-specific configuration
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Add local overrides (not checked into git)
            .add_source(File::with_name(&format!("{}/local", config_dir)).required(false))
            // Add environment variables (e.g., DATA_CHECKER__DATABASE__URL)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Get the configuration directory path
    fn config_dir() -> String {
        std::env::var("DATA_CHECKER_CONFIG_DIR").unwrap_or_else(|_| "config".into())
    }

    /// Create default settings (useful for testing)
    pub fn default_settings() -> Self {
        Settings {
            database: DatabaseSettings::default(),
            notification: NotificationSettings::default(),
            checks: CheckSettings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::default_settings()
    }
}
