use anyhow::{Context, Result};
use std::str::FromStr;

use super::dimensions::{self, DimensionDefinition};
use crate::stats::Score;

pub const DEFAULT_SCORE_MIN: Score = 1;
pub const DEFAULT_SCORE_MAX: Score = 5;
pub const DEFAULT_MIN_SAMPLE_FOR_DISPLAY: usize = 3;

#[derive(Debug, Clone)]
pub struct StatsSettings {
    pub score_min: Score,
    pub score_max: Score,
    pub min_sample_for_display: usize,
    pub dimensions: Vec<DimensionDefinition>,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            score_min: DEFAULT_SCORE_MIN,
            score_max: DEFAULT_SCORE_MAX,
            min_sample_for_display: DEFAULT_MIN_SAMPLE_FOR_DISPLAY,
            dimensions: dimensions::get_dimensions(),
        }
    }
}

impl StatsSettings {
    /// Same dimensions and threshold, different score scale
    pub fn with_score_range(mut self, min: Score, max: Score) -> Self {
        self.score_min = min;
        self.score_max = max;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub database_path: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_path: "movie_ratings.db".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stats: StatsSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            stats: StatsSettings::default(),
            server: ServerSettings::default(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH`, `STATS_SCORE_MIN`,
    /// `STATS_SCORE_MAX` and `STATS_MIN_SAMPLE` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.server.database_path = path;
        }
        if let Some(min) = read_env_var("STATS_SCORE_MIN")? {
            config.stats.score_min = min;
        }
        if let Some(max) = read_env_var("STATS_SCORE_MAX")? {
            config.stats.score_max = max;
        }
        if let Some(threshold) = read_env_var("STATS_MIN_SAMPLE")? {
            config.stats.min_sample_for_display = threshold;
        }

        Ok(config)
    }
}

fn read_env_var<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_setting(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Failed to parse {} value: {:?}", key, raw))
}
