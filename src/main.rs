mod aging;
mod cleanup;
mod config;
mod history;
mod model;
mod normalize;
mod radarr;
mod report;

use std::io;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use cleanup::Cleaner;
use radarr::client::RadarrClient;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = config::load_config()?;
    let client = RadarrClient::new(
        &config.radarr,
        Duration::from_secs(config.cleanup.timeout_secs),
    )?;

    let fetch = history::fetch_all_history(&client, config.cleanup.page_size).await;
    if fetch.is_partial() {
        tracing::warn!(
            pages = fetch.pages,
            records = fetch.records.len(),
            "continuing with partial history"
        );
    }

    let movies = normalize::normalize(&fetch.records);
    if movies.is_empty() {
        println!("Could not retrieve movie history.");
        return Ok(());
    }

    println!(
        "Checking {} movies for imports older than {} days",
        movies.len(),
        config.cleanup.max_age_days
    );

    let now = chrono::Local::now().naive_local();
    let cleaner = Cleaner::new(&client, &config.cleanup);
    let report = cleaner.run(&movies, now).await;

    println!("{report}");
    for entry in report.failures() {
        let id = entry
            .movie_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {} (ID: {id}): {}: {}",
            entry.title,
            entry.outcome,
            entry.outcome.reason().unwrap_or_default()
        );
    }

    Ok(())
}
