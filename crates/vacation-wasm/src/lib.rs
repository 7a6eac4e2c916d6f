//! WASM bindings for vacation-engine.
//!
//! Exposes calendar parsing, single-duration optimization and the duration
//! sweep to JavaScript via `wasm-bindgen`. Raw feeds go in as a JSON array of
//! iCalendar strings and results come back as JSON strings, so the browser
//! side only fetches files and renders.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p vacation-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/vacation_wasm.wasm
//! ```

use serde::Serialize;
use vacation_engine::{
    sweep_report, DestinationCatalog, PlannerConfig, PlannerSession, SingleReport,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GroupDto<'a> {
    group_id: &'a str,
    events: usize,
}

// ---------------------------------------------------------------------------
// Helpers (plain `String` errors so they can be tested off-wasm)
// ---------------------------------------------------------------------------

fn session_from(calendars_json: &str, timezone: &str) -> Result<PlannerSession, String> {
    let feeds: Vec<String> = serde_json::from_str(calendars_json)
        .map_err(|e| format!("Invalid calendars JSON: {}", e))?;
    let config = PlannerConfig::with_timezone(timezone).map_err(|e| e.to_string())?;
    let events = vacation_engine::parse_feeds(&feeds, &config).map_err(|e| e.to_string())?;
    Ok(PlannerSession::new(config, DestinationCatalog::default(), events))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn plan_single_json(
    calendars_json: &str,
    team: &str,
    duration_days: i32,
    timezone: &str,
) -> Result<String, String> {
    let session = session_from(calendars_json, timezone)?;
    let result = session
        .run_single(team, i64::from(duration_days))
        .map_err(|e| e.to_string())?;
    let report = SingleReport::new(team, &result, session.config().timezone, false);
    to_json(&report)
}

fn plan_sweep_json(calendars_json: &str, team: &str, timezone: &str) -> Result<String, String> {
    let session = session_from(calendars_json, timezone)?;
    to_json(&sweep_report(&session.run_sweep(team)))
}

fn list_groups_json(calendars_json: &str, timezone: &str) -> Result<String, String> {
    let session = session_from(calendars_json, timezone)?;
    let groups: Vec<GroupDto> = session
        .index()
        .group_sizes()
        .map(|(group_id, events)| GroupDto { group_id, events })
        .collect();
    to_json(&groups)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Optimize one vacation length for a team.
///
/// Returns a JSON object with `group_id`, `duration_days`, `optimal_count` and
/// `windows` (only those containing at least one event), each window carrying
/// `start`, `end`, `events` and an `optimal` flag as RFC 3339 strings in the
/// display zone.
///
/// # Arguments
/// - `calendars_json` -- JSON array of raw iCalendar feed texts
/// - `team` -- Group id as it appears after `@` in event summaries
/// - `duration_days` -- Vacation length; must be at least 1
/// - `timezone` -- IANA display zone (e.g., "America/Toronto")
#[wasm_bindgen(js_name = "planSingle")]
pub fn plan_single(
    calendars_json: &str,
    team: &str,
    duration_days: i32,
    timezone: &str,
) -> Result<String, JsValue> {
    plan_single_json(calendars_json, team, duration_days, timezone)
        .map_err(|e| JsValue::from_str(&e))
}

/// Optimize every vacation length from 2 to 15 days for a team.
///
/// Returns a JSON array of `{duration_days, optimal_count, optimal_windows}`.
#[wasm_bindgen(js_name = "planSweep")]
pub fn plan_sweep(calendars_json: &str, team: &str, timezone: &str) -> Result<String, JsValue> {
    plan_sweep_json(calendars_json, team, timezone).map_err(|e| JsValue::from_str(&e))
}

/// List the groups found in the feeds as a JSON array of `{group_id, events}`.
#[wasm_bindgen(js_name = "listGroups")]
pub fn list_groups(calendars_json: &str, timezone: &str) -> Result<String, JsValue> {
    list_groups_json(calendars_json, timezone).map_err(|e| JsValue::from_str(&e))
}
