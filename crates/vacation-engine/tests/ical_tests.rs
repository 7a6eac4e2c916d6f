//! Tests for the iCalendar reader.

use chrono::{TimeZone, Utc};
use vacation_engine::ical::{parse_calendar, parse_feeds};
use vacation_engine::{DatasetSpan, PlannerConfig, PlannerError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn calendar(body: &str) -> String {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\n{}END:VCALENDAR\r\n",
        body
    )
}

fn vevent(summary: &str, dtstart: &str) -> String {
    format!(
        "BEGIN:VEVENT\r\nSUMMARY:{}\r\n{}\r\nEND:VEVENT\r\n",
        summary,
        dtstart
    )
}

fn toronto() -> PlannerConfig {
    PlannerConfig::default()
}

// ── Happy path ──────────────────────────────────────────────────────────────

#[test]
fn utc_event_is_parsed_with_group() {
    let ics = calendar(&vevent("Ottawa @ Toronto", "DTSTART:20241015T233000Z"));

    let events = parse_calendar(&ics, &toronto()).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].group_id, "Toronto");
    assert_eq!(events[0].summary, "Ottawa @ Toronto");
    assert_eq!(
        events[0].start,
        Utc.with_ymd_and_hms(2024, 10, 15, 23, 30, 0).unwrap()
    );
}

#[test]
fn events_without_delimiter_are_filtered_out() {
    let body = [
        vevent("Ottawa @ Toronto", "DTSTART:20241015T233000Z"),
        vevent("Practice day", "DTSTART:20241016T150000Z"),
        vevent("Boston @ Montreal", "DTSTART:20241017T230000Z"),
    ]
    .concat();

    let events = parse_calendar(&calendar(&body), &toronto()).unwrap();

    let groups: Vec<&str> = events.iter().map(|e| e.group_id.as_str()).collect();
    assert_eq!(groups, vec!["Toronto", "Montreal"]);
}

#[test]
fn group_id_is_trimmed() {
    let ics = calendar(&vevent("Ottawa  @   New York  ", "DTSTART:20241015T233000Z"));
    let events = parse_calendar(&ics, &toronto()).unwrap();
    assert_eq!(events[0].group_id, "New York");
}

#[test]
fn file_order_is_preserved() {
    let body = [
        vevent("A @ Late", "DTSTART:20241020T000000Z"),
        vevent("B @ Early", "DTSTART:20241001T000000Z"),
    ]
    .concat();

    let events = parse_calendar(&calendar(&body), &toronto()).unwrap();

    assert_eq!(events[0].group_id, "Late");
    assert_eq!(events[1].group_id, "Early");
}

#[test]
fn tzid_local_time_is_converted_to_utc() {
    // 19:00 EDT == 23:00 UTC
    let ics = calendar(&vevent(
        "Ottawa @ Toronto",
        "DTSTART;TZID=America/Toronto:20241015T190000",
    ));
    let events = parse_calendar(&ics, &toronto()).unwrap();
    assert_eq!(
        events[0].start,
        Utc.with_ymd_and_hms(2024, 10, 15, 23, 0, 0).unwrap()
    );
}

#[test]
fn floating_time_uses_display_zone() {
    let ics = calendar(&vevent("Ottawa @ Vancouver", "DTSTART:20240115T190000"));

    let toronto_events = parse_calendar(&ics, &toronto()).unwrap();
    let vancouver_events =
        parse_calendar(&ics, &PlannerConfig::with_timezone("America/Vancouver").unwrap()).unwrap();

    // EST is UTC-5, PST is UTC-8.
    assert_eq!(
        toronto_events[0].start,
        Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap()
    );
    assert_eq!(
        vancouver_events[0].start,
        Utc.with_ymd_and_hms(2024, 1, 16, 3, 0, 0).unwrap()
    );
}

#[test]
fn unknown_tzid_falls_back_to_display_zone() {
    let ics = calendar(&vevent(
        "Ottawa @ Toronto",
        "DTSTART;TZID=Custom Eastern:20240115T190000",
    ));
    let events = parse_calendar(&ics, &toronto()).unwrap();
    assert_eq!(
        events[0].start,
        Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap()
    );
}

#[test]
fn all_day_event_starts_at_local_midnight() {
    let ics = calendar(&vevent("Ottawa @ Toronto", "DTSTART;VALUE=DATE:20240701"));
    let events = parse_calendar(&ics, &toronto()).unwrap();
    assert_eq!(
        events[0].start,
        Utc.with_ymd_and_hms(2024, 7, 1, 4, 0, 0).unwrap()
    );
}

#[test]
fn folded_summary_and_escapes_are_decoded() {
    let ics = calendar(
        "BEGIN:VEVENT\r\nSUMMARY:Ottawa\\, ON @ Tor\r\n onto\r\nDTSTART:20241015T233000Z\r\nEND:VEVENT\r\n",
    );
    let events = parse_calendar(&ics, &toronto()).unwrap();
    assert_eq!(events[0].summary, "Ottawa, ON @ Toronto");
    assert_eq!(events[0].group_id, "Toronto");
}

#[test]
fn lf_line_endings_are_accepted() {
    let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:A @ B\nDTSTART:20241015T233000Z\nEND:VEVENT\nEND:VCALENDAR\n";
    let events = parse_calendar(ics, &toronto()).unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn nested_alarm_and_timezone_components_are_skipped() {
    let body = "BEGIN:VTIMEZONE\r\nTZID:America/Toronto\r\nBEGIN:STANDARD\r\nDTSTART:19701101T020000\r\nEND:STANDARD\r\nEND:VTIMEZONE\r\n\
BEGIN:VEVENT\r\nSUMMARY:A @ B\r\nDTSTART:20241015T233000Z\r\nBEGIN:VALARM\r\nSUMMARY:Reminder @ Nowhere\r\nDTSTART:20200101T000000Z\r\nEND:VALARM\r\nEND:VEVENT\r\n";
    let events = parse_calendar(&calendar(body), &toronto()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].group_id, "B");
    assert_eq!(
        events[0].start,
        Utc.with_ymd_and_hms(2024, 10, 15, 23, 30, 0).unwrap()
    );
}

#[test]
fn custom_delimiter_is_respected() {
    let config = PlannerConfig {
        delimiter: '|',
        ..PlannerConfig::default()
    };
    let body = [
        vevent("Ottawa | Toronto", "DTSTART:20241015T233000Z"),
        vevent("Ottawa @ Toronto", "DTSTART:20241016T233000Z"),
    ]
    .concat();
    let events = parse_calendar(&calendar(&body), &config).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].group_id, "Toronto");
}

#[test]
fn empty_calendar_yields_no_events() {
    let events = parse_calendar(&calendar(""), &toronto()).unwrap();
    assert!(events.is_empty());
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[test]
fn non_calendar_text_is_a_parse_error() {
    let err = parse_calendar("<html>not a calendar</html>", &toronto()).unwrap_err();
    assert!(matches!(err, PlannerError::Parse { line: 1, .. }), "{:?}", err);
}

#[test]
fn blank_text_is_a_parse_error() {
    let err = parse_calendar("  \r\n", &toronto()).unwrap_err();
    assert!(matches!(err, PlannerError::Parse { .. }));
}

#[test]
fn wrong_first_component_is_a_parse_error() {
    let err = parse_calendar("BEGIN:VEVENT\r\nEND:VEVENT\r\n", &toronto()).unwrap_err();
    assert!(matches!(err, PlannerError::Parse { line: 1, .. }));
}

#[test]
fn unterminated_calendar_is_a_parse_error() {
    let err = parse_calendar(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:A @ B\r\nDTSTART:20241015T233000Z\r\nEND:VEVENT\r\n",
        &toronto(),
    )
    .unwrap_err();
    match err {
        PlannerError::Parse { message, .. } => assert!(message.contains("VCALENDAR")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn mismatched_end_is_a_parse_error() {
    let err = parse_calendar(
        "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VTODO\r\nEND:VCALENDAR\r\n",
        &toronto(),
    )
    .unwrap_err();
    assert!(matches!(err, PlannerError::Parse { line: 3, .. }));
}

#[test]
fn event_without_dtstart_is_a_parse_error() {
    let err = parse_calendar(
        &calendar("BEGIN:VEVENT\r\nSUMMARY:A @ B\r\nEND:VEVENT\r\n"),
        &toronto(),
    )
    .unwrap_err();
    assert!(matches!(err, PlannerError::Parse { line: 4, .. }), "{:?}", err);
}

#[test]
fn garbage_dtstart_is_a_parse_error() {
    let err = parse_calendar(
        &calendar(&vevent("A @ B", "DTSTART:tomorrow-ish")),
        &toronto(),
    )
    .unwrap_err();
    assert!(matches!(err, PlannerError::Parse { .. }));
}

#[test]
fn line_without_colon_is_a_parse_error() {
    let err = parse_calendar("BEGIN:VCALENDAR\r\nGARBAGE\r\nEND:VCALENDAR\r\n", &toronto())
        .unwrap_err();
    assert!(matches!(err, PlannerError::Parse { line: 2, .. }));
}

// ── Multiple feeds ──────────────────────────────────────────────────────────

#[test]
fn feeds_are_concatenated_not_merged() {
    let feed_a = calendar(&vevent("X @ Late", "DTSTART:20241020T000000Z"));
    let feed_b = calendar(&vevent("Y @ Early", "DTSTART:20241001T000000Z"));

    let events = parse_feeds(&[feed_a, feed_b], &toronto()).unwrap();

    let groups: Vec<&str> = events.iter().map(|e| e.group_id.as_str()).collect();
    assert_eq!(groups, vec!["Late", "Early"]);
}

#[test]
fn failing_feed_is_reported_with_its_number() {
    let good = calendar(&vevent("X @ Y", "DTSTART:20241020T000000Z"));
    let bad = "not a calendar".to_string();

    let err = parse_feeds(&[good, bad], &toronto()).unwrap_err();

    match err {
        PlannerError::Parse { message, .. } => assert!(message.starts_with("feed 2:"), "{}", message),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn summary_with_empty_group_does_not_widen_the_span() {
    let body = [
        vevent("Ottawa @ ", "DTSTART:20241001T230000Z"),
        vevent("Ottawa @ Toronto", "DTSTART:20241015T230000Z"),
    ]
    .concat();
    let config = PlannerConfig::with_timezone("UTC").unwrap();

    let events = parse_calendar(&calendar(&body), &config).unwrap();
    let span = DatasetSpan::of(&events, &config).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(
        span.earliest,
        chrono_tz::UTC.with_ymd_and_hms(2024, 10, 15, 0, 0, 0).unwrap()
    );
}
