use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{env, str::FromStr};

use crate::{game::DEFAULT_PLACEMENT_TRIALS, utils::letters::FillMode};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `None` keeps progress in memory only
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub placement_trials: usize,
    pub fill_mode: FillMode,
    pub min_grid_size: usize,
    pub max_grid_size: usize,
    pub hints_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            placement_trials: DEFAULT_PLACEMENT_TRIALS,
            fill_mode: FillMode::Uniform,
            min_grid_size: 4,
            max_grid_size: 20,
            hints_enabled: true,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_grid_size == 0 || self.max_grid_size < self.min_grid_size {
            bail!(
                "MAX_GRID_SIZE must be at least {}, got {}",
                self.min_grid_size.max(1),
                self.max_grid_size
            );
        }
        Ok(())
    }
}

/// Parse an optional raw setting, falling back to `default` when unset
fn parse_setting<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got {:?}", name, value)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Some(DatabaseConfig {
                url,
                max_connections: parse_setting(
                    "DATABASE_MAX_CONNECTIONS",
                    env::var("DATABASE_MAX_CONNECTIONS").ok(),
                    10,
                )?,
            }),
            _ => None,
        };

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_setting("PORT", env::var("PORT").ok(), 3000)?,
        };

        let defaults = GameConfig::default();
        let game = GameConfig {
            placement_trials: parse_setting(
                "PLACEMENT_TRIALS",
                env::var("PLACEMENT_TRIALS").ok(),
                defaults.placement_trials,
            )?,
            fill_mode: match env::var("FILL_MODE") {
                Ok(mode) => mode
                    .parse()
                    .map_err(anyhow::Error::msg)
                    .context("FILL_MODE must be 'uniform' or 'frequency'")?,
                Err(_) => defaults.fill_mode,
            },
            min_grid_size: defaults.min_grid_size,
            max_grid_size: parse_setting(
                "MAX_GRID_SIZE",
                env::var("MAX_GRID_SIZE").ok(),
                defaults.max_grid_size,
            )?,
            hints_enabled: env::var("HINTS_ENABLED")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.hints_enabled),
        };

        game.validate()?;

        Ok(Config {
            database,
            server,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
