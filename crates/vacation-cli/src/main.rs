//! `vacation` CLI: find the vacation dates with the most fixtures for a
//! destination's team.
//!
//! ## Usage
//!
//! ```sh
//! # Best windows for every length from 2 to 15 days
//! vacation plan -l locations.json -c season_a.ics -c season_b.ics -t Toronto
//!
//! # One length, with the per-window table
//! vacation plan -l locations.json -c season_a.ics -t "Toronto, ON" -d 5
//!
//! # Machine-readable output in another display zone
//! vacation plan -c season_a.ics -t Vancouver -d 7 --timezone America/Vancouver --format json
//!
//! # List destinations, or the groups found in the feeds
//! vacation destinations -l locations.json
//! vacation groups -c season_a.ics
//! ```
//!
//! Logs go to stderr and are controlled with `RUST_LOG` (default `warn`).

mod load;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vacation_engine::{
    sweep_report, Classification, DurationRequest, PlannerConfig, PlannerSession, SingleReport,
};

/// Environment variable consulted when `--timezone` is not given.
const TIMEZONE_ENV: &str = "VACATION_PLANNER_TZ";

#[derive(Parser)]
#[command(
    name = "vacation",
    version,
    about = "Pick vacation dates that overlap the most fixtures"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best vacation windows for a destination
    Plan {
        /// Destination list (JSON array of {location, country, team, classification})
        #[arg(short, long)]
        locations: Option<String>,
        /// iCalendar feed; repeat for several feeds
        #[arg(short, long = "calendar", required = true)]
        calendars: Vec<String>,
        /// Team id or destination location name
        #[arg(short, long)]
        team: String,
        /// Vacation length in calendar days; 0 sweeps every length from 2 to 15
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        duration: String,
        /// IANA display zone (falls back to $VACATION_PLANNER_TZ, then America/Toronto)
        #[arg(long)]
        timezone: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Also list windows that contain no events
        #[arg(long)]
        all_windows: bool,
    },
    /// List destinations grouped by classification
    Destinations {
        #[arg(short, long)]
        locations: String,
    },
    /// List the groups found in calendar feeds with their event counts
    Groups {
        #[arg(short, long = "calendar", required = true)]
        calendars: Vec<String>,
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            locations,
            calendars,
            team,
            duration,
            timezone,
            format,
            all_windows,
        } => {
            // Reject bad input before touching any file.
            let request = DurationRequest::parse(&duration)?;
            let config = resolve_config(timezone.as_deref())?;

            let (catalog, events) =
                load::load_dataset(locations.as_deref(), &calendars, &config).await?;
            let session = PlannerSession::new(config, catalog, events);
            let group = session.resolve_group(&team);

            let output = match request {
                DurationRequest::Single(days) => {
                    let result = session.run_single(group, i64::from(days.get()))?;
                    let report =
                        SingleReport::new(group, &result, session.config().timezone, all_windows);
                    match format {
                        OutputFormat::Text => render::single(&report),
                        OutputFormat::Json => to_json(&report)?,
                    }
                }
                DurationRequest::Sweep => {
                    let rows = sweep_report(&session.run_sweep(group));
                    match format {
                        OutputFormat::Text => render::sweep(&rows),
                        OutputFormat::Json => to_json(&rows)?,
                    }
                }
            };
            print!("{}", output);
        }
        Commands::Destinations { locations } => {
            let catalog = load::load_catalog(&locations).await?;
            let sections: Vec<String> = Classification::ALL
                .iter()
                .map(|c| {
                    render::destinations(&format!("Group {:?}", c), &catalog.by_classification(*c))
                })
                .collect();
            print!("{}", sections.join("\n"));
        }
        Commands::Groups {
            calendars,
            timezone,
        } => {
            let config = resolve_config(timezone.as_deref())?;
            let events = load::load_events(&calendars, &config).await?;
            let index = vacation_engine::EventIndex::build(events);
            print!("{}", render::groups(index.group_sizes()));
        }
    }

    Ok(())
}

/// Display zone from the flag, then the environment, then the default.
fn resolve_config(timezone: Option<&str>) -> Result<PlannerConfig> {
    let from_env = std::env::var(TIMEZONE_ENV).ok();
    match timezone.or(from_env.as_deref()) {
        Some(name) => PlannerConfig::with_timezone(name)
            .with_context(|| format!("Unknown time zone: {}", name)),
        None => Ok(PlannerConfig::default()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    json.push('\n');
    Ok(json)
}
