//! Reading the destination list and calendar feeds from disk.
//!
//! All files are read concurrently and must all succeed before anything is
//! parsed.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use vacation_engine::{parse_feeds, DestinationCatalog, Event, PlannerConfig};

async fn read(path: &str) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path))
}

/// Read every feed and parse them into one concatenated event list.
pub async fn load_events(paths: &[String], config: &PlannerConfig) -> Result<Vec<Event>> {
    let feeds = try_join_all(paths.iter().map(|p| read(p))).await?;
    parse_events(&feeds, config)
}

/// Read the destination list (if any) and every feed concurrently.
pub async fn load_dataset(
    locations: Option<&str>,
    calendars: &[String],
    config: &PlannerConfig,
) -> Result<(DestinationCatalog, Vec<Event>)> {
    let catalog = async {
        match locations {
            Some(path) => read(path).await.map(Some),
            None => Ok(None),
        }
    };
    let feeds = try_join_all(calendars.iter().map(|p| read(p)));

    let (catalog_json, feeds) = tokio::try_join!(catalog, feeds)?;

    let catalog = match catalog_json {
        Some(json) => {
            DestinationCatalog::from_json(&json).context("Failed to load destination list")?
        }
        None => DestinationCatalog::default(),
    };
    let events = parse_events(&feeds, config)?;

    tracing::info!(
        destinations = catalog.len(),
        feeds = feeds.len(),
        events = events.len(),
        "dataset loaded"
    );
    Ok((catalog, events))
}

pub async fn load_catalog(path: &str) -> Result<DestinationCatalog> {
    let json = read(path).await?;
    DestinationCatalog::from_json(&json).context("Failed to load destination list")
}

fn parse_events(feeds: &[String], config: &PlannerConfig) -> Result<Vec<Event>> {
    parse_feeds(feeds, config).context("Failed to parse calendar feeds")
}
