//! Report service composition root
//!
//! Builds the connection pool and tracing subscriber from `Config` and wires
//! the Reports domain repositories on top of them.

use std::time::Duration;

use reportservice_common::config::{Config, LogFormat};
use reportservice_common::PageRequest;
use reportservice_query::EntityStream;
use reportservice_reports::{EntityKind, ReportsRepositories};
use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio_stream::StreamExt;

/// Install the global tracing subscriber
pub fn init_tracing(config: &Config) -> Result<(), anyhow::Error> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.rust_log)
        .map_err(|e| anyhow::anyhow!("Invalid RUST_LOG '{}': {}", config.rust_log, e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Open the connection pool; acquire timeouts live here, not in the engine
pub async fn connect(config: &Config) -> Result<PgPool, anyhow::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
        .connect(&config.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))
}

/// Create the Reports domain repositories over `pool`
pub fn create_repositories(pool: PgPool) -> ReportsRepositories {
    ReportsRepositories::new(pool)
}

/// Print one page of `kind` to `out` as JSON lines; returns the number of rows written
pub async fn dump_page<W: std::io::Write>(
    repos: &ReportsRepositories,
    kind: EntityKind,
    page: &PageRequest,
    out: &mut W,
) -> reportservice_common::Result<usize> {
    match kind {
        EntityKind::Author => write_lines(repos.authors.find_all_by(page), out).await,
        EntityKind::Report => write_lines(repos.reports.find_all_by(page), out).await,
        EntityKind::Bathroom => write_lines(repos.bathrooms.find_all_by(page), out).await,
        EntityKind::Bedroom => write_lines(repos.bedrooms.find_all_by(page), out).await,
        EntityKind::Entrance => write_lines(repos.entrances.find_all_by(page), out).await,
        EntityKind::EnvFactor => write_lines(repos.env_factors.find_all_by(page), out).await,
        EntityKind::Infrastructure => {
            write_lines(repos.infrastructures.find_all_by(page), out).await
        }
        EntityKind::Kitchen => write_lines(repos.kitchens.find_all_by(page), out).await,
        EntityKind::LivingRoom => write_lines(repos.living_rooms.find_all_by(page), out).await,
    }
}

async fn write_lines<T: Serialize, W: std::io::Write>(
    mut rows: EntityStream<T>,
    out: &mut W,
) -> reportservice_common::Result<usize> {
    let mut written = 0;
    while let Some(row) = rows.next().await {
        serde_json::to_writer(&mut *out, &row?)?;
        writeln!(out).map_err(serde_json::Error::io)?;
        written += 1;
    }
    Ok(written)
}
