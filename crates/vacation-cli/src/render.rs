//! Text rendering of planner results.

use chrono::DateTime;
use chrono_tz::Tz;
use vacation_engine::{Destination, SingleReport, SweepRow, WindowRow};

const DATE_TIME_FORMAT: &str = "%A, %B %-d, %Y at %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_time(dt: &DateTime<Tz>) -> String {
    dt.format(DATE_TIME_FORMAT).to_string()
}

/// Summary sentence followed by one block per listed window.
pub fn single(report: &SingleReport) -> String {
    let mut out = format!(
        "An optimal vacation of {} calendar day(s) in the selected destination contains {} exciting day(s).\n",
        report.duration_days, report.optimal_count
    );
    for row in &report.windows {
        out.push('\n');
        out.push_str(&window_block(row));
    }
    out
}

fn window_block(row: &WindowRow) -> String {
    let events: String = row
        .events
        .iter()
        .map(|event| format!("  - {}\n", date_time(event)))
        .collect();
    format!(
        "From:    {}\nTo:      {}\nOptimal: {}\nEvents:\n{}",
        date_time(&row.start),
        date_time(&row.end),
        if row.optimal { "Yes" } else { "No" },
        events
    )
}

/// Every tied optimal window for each swept duration.
pub fn sweep(rows: &[SweepRow]) -> String {
    rows.iter()
        .map(|row| {
            let ranges: String = row
                .optimal_windows
                .iter()
                .map(|window| {
                    format!(
                        "  from {} to {} (num_exciting_days={})\n",
                        window.start.format(DATE_FORMAT),
                        window.end.format(DATE_FORMAT),
                        row.optimal_count
                    )
                })
                .collect();
            format!(
                "Optimal ranges for a vacation of {} calendar days:\n{}\n",
                row.duration_days, ranges
            )
        })
        .collect()
}

/// One tier of the destination list.
pub fn destinations(title: &str, listed: &[&Destination]) -> String {
    let entries: String = listed
        .iter()
        .map(|d| format!("  {} {} [{}]\n", d.flag(), d.location, d.team))
        .collect();
    format!("{}:\n{}", title, entries)
}

pub fn groups<'a>(sizes: impl Iterator<Item = (&'a str, usize)>) -> String {
    sizes
        .map(|(group, count)| format!("{}\t{}\n", group, count))
        .collect()
}
