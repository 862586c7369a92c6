//! Configuration management for the FitCoach engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FC__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gamification: GamificationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Gamification service tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// Leaderboard size when the caller gives none
    pub leaderboard_default_limit: usize,
    /// Inactivity after which workout and check-in streaks reset
    pub streak_reset_hours: i64,
    /// Insert the default badge catalog into an empty store on startup
    pub seed_default_achievements: bool,
}

/// Store persistence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot loaded on startup and written on exit
    pub snapshot_path: Option<String>,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            leaderboard_default_limit: 10,
            streak_reset_hours: 24,
            seed_default_achievements: true,
        }
    }
}

impl GamificationConfig {
    pub fn streak_reset_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.streak_reset_hours)
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FC__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., FC__GAMIFICATION__STREAK_RESET_HOURS=48
            .add_source(config::Environment::with_prefix("FC").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
