//! Report service - prints one page of an entity kind as JSON lines
//!
//! Usage: `reportservice [kind] [page] [column,asc|desc ...]`
//!
//! Exits with status 2 when the request itself is rejected (unknown sort
//! column, invalid page window) and 1 on any other failure.

use std::io::Write;

use tracing::{error, info};

use reportservice_common::config::Config;
use reportservice_common::{PageRequest, SortKey};
use reportservice_reports::EntityKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    reportservice_app::init_tracing(&config)?;

    info!("Starting report service");

    let mut args = std::env::args().skip(1);
    let kind = match args.next() {
        Some(raw) => raw.parse::<EntityKind>().map_err(anyhow::Error::msg)?,
        None => EntityKind::Report,
    };
    let page_number = match args.next() {
        Some(raw) => raw.parse::<i64>()?,
        None => 0,
    };
    let mut page = PageRequest::of(page_number, config.default_page_size);
    for raw in args {
        page = page.sorted_by(raw.parse::<SortKey>().map_err(anyhow::Error::msg)?);
    }

    let pool = reportservice_app::connect(&config).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        e
    })?;

    info!("Database connection established");

    let repos = reportservice_app::create_repositories(pool);
    for (counted, total) in repos.count_all().await? {
        info!(entity = %counted, total, "Row count");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = match reportservice_app::dump_page(&repos, kind, &page, &mut out).await {
        Ok(written) => written,
        Err(e) => {
            error!(
                entity = %kind,
                code = e.error_code(),
                client_error = e.is_client_error(),
                "Failed to read page: {}",
                e
            );
            if e.is_client_error() {
                std::process::exit(2);
            }
            return Err(e.into());
        }
    };
    out.flush()?;

    info!(entity = %kind, page = page.page_number(), rows = written, "Page written");
    Ok(())
}
