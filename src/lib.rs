pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod services;
pub mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::database::SqliteRatingSource;
use crate::services::server::ServerService;
use crate::services::statistics::StatisticsService;
use crate::stats::StatsEngine;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init() -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.server.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::ensure_schema(&mut conn)
}

pub fn handle_report(movie_id: &str, dimension: Option<&str>, raw: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let service = build_statistics_service(&config)?;

    let json = match (dimension, raw) {
        (Some(dimension), _) => service
            .presented_dimension(movie_id, dimension)?
            .map(|d| serde_json::to_string_pretty(&d))
            .transpose()?,
        (None, true) => service
            .movie_report(movie_id)?
            .map(|r| serde_json::to_string_pretty(&r))
            .transpose()?,
        (None, false) => service
            .presented_report(movie_id)?
            .map(|r| serde_json::to_string_pretty(&r))
            .transpose()?,
    };

    let json = json.with_context(|| format!("Movie not found: {}", movie_id))?;
    println!("{}", json);
    Ok(())
}

fn build_statistics_service(config: &AppConfig) -> Result<StatisticsService> {
    let engine = StatsEngine::new(&config.stats).context("Invalid statistics settings")?;
    let pool = database::create_pool(&config.server.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::ensure_schema(&mut conn)?;
    drop(conn);
    Ok(StatisticsService::new(engine, Box::new(SqliteRatingSource::new(pool))))
}
