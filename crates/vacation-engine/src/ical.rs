//! iCalendar (RFC 5545) reader -- turns raw `.ics` text into normalized events.
//!
//! Only the subset needed to place fixtures on a timeline is understood:
//!
//! - Line unfolding (CRLF/LF followed by a space or tab)
//! - `BEGIN`/`END` component nesting, validated as a stack
//! - `SUMMARY` with text escapes (`\\`, `\;`, `\,`, `\n`)
//! - `DTSTART` as UTC (`...Z`), `TZID=` local time, floating local time, or
//!   `VALUE=DATE`
//!
//! Recurrence rules are not expanded; each `VEVENT` yields at most one event.
//! Components other than `VEVENT` (and anything nested inside one, such as
//! `VALARM`) are skipped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::config::PlannerConfig;
use crate::dst::{local_midnight, DstPolicy};
use crate::error::{PlannerError, Result};
use crate::event::Event;

/// Parse one calendar feed into events, in file order.
///
/// Events whose summary lacks `config.delimiter` are dropped. The group is the
/// text between the first delimiter and the next one, trimmed.
///
/// # Errors
/// Returns `PlannerError::Parse` if the text is not a well-formed `VCALENDAR`
/// or a `VEVENT` has a missing or unreadable `DTSTART`.
pub fn parse_calendar(text: &str, config: &PlannerConfig) -> Result<Vec<Event>> {
    let lines = unfold(text);
    if lines.is_empty() {
        return Err(parse_error(1, "empty calendar".to_string()));
    }

    let mut stack: Vec<String> = Vec::new();
    let mut pending: Option<PendingEvent> = None;
    let mut events = Vec::new();
    let mut skipped = 0usize;

    for line in &lines {
        let prop = parse_property(line)?;
        let name = prop.name.clone();

        match name.as_str() {
            "BEGIN" => {
                let component = prop.value.trim().to_ascii_uppercase();
                if stack.is_empty() && component != "VCALENDAR" {
                    return Err(parse_error(
                        line.number,
                        format!("expected BEGIN:VCALENDAR, found BEGIN:{}", component),
                    ));
                }
                if component == "VEVENT" && stack.len() == 1 {
                    pending = Some(PendingEvent::new(line.number));
                }
                stack.push(component);
            }
            "END" => {
                let component = prop.value.trim().to_ascii_uppercase();
                match stack.pop() {
                    Some(open) if open == component => {}
                    Some(open) => {
                        return Err(parse_error(
                            line.number,
                            format!("END:{} does not close BEGIN:{}", component, open),
                        ));
                    }
                    None => {
                        return Err(parse_error(
                            line.number,
                            format!("END:{} without matching BEGIN", component),
                        ));
                    }
                }
                if component == "VEVENT" && stack.len() == 1 {
                    if let Some(done) = pending.take() {
                        match done.finish(config)? {
                            Some(event) => events.push(event),
                            None => skipped += 1,
                        }
                    }
                }
            }
            _ if stack.is_empty() => {
                return Err(parse_error(
                    line.number,
                    format!("property {} outside of VCALENDAR", name),
                ));
            }
            _ => {
                // Only properties that belong directly to the VEVENT count.
                if stack.len() == 2 {
                    if let Some(ev) = pending.as_mut() {
                        ev.absorb(prop);
                    }
                }
            }
        }
    }

    if let Some(open) = stack.last() {
        let last_line = lines.last().map_or(1, |l| l.number);
        return Err(parse_error(
            last_line,
            format!("unterminated component BEGIN:{}", open),
        ));
    }

    tracing::debug!(
        events = events.len(),
        skipped,
        "parsed calendar feed"
    );
    Ok(events)
}

/// Parse several feeds and concatenate their events in feed order.
///
/// No sorting happens here; see [`crate::event::sort_events`].
///
/// # Errors
/// The first feed that fails to parse aborts the load. Its error message is
/// prefixed with the 1-based feed number.
pub fn parse_feeds<S: AsRef<str>>(feeds: &[S], config: &PlannerConfig) -> Result<Vec<Event>> {
    let mut all = Vec::new();
    for (i, feed) in feeds.iter().enumerate() {
        let events = parse_calendar(feed.as_ref(), config).map_err(|e| match e {
            PlannerError::Parse { line, message } => PlannerError::Parse {
                line,
                message: format!("feed {}: {}", i + 1, message),
            },
            other => other,
        })?;
        all.extend(events);
    }
    Ok(all)
}

/// Extract the group id from a summary such as `"Ottawa @ Toronto"`.
///
/// The group is the trimmed text between the first and second delimiter.
/// Summaries with no delimiter or nothing after it (`"Ottawa @ "`) yield
/// `None`; their events are dropped before indexing and so never widen the
/// dataset span.
pub fn group_of(summary: &str, delimiter: char) -> Option<&str> {
    let mut parts = summary.split(delimiter);
    parts.next();
    let group = parts.next()?.trim();
    if group.is_empty() {
        None
    } else {
        Some(group)
    }
}

// ---------------------------------------------------------------------------
// Content lines
// ---------------------------------------------------------------------------

/// A logical (unfolded) content line and the physical line it started on.
struct ContentLine {
    number: usize,
    text: String,
}

fn unfold(text: &str) -> Vec<ContentLine> {
    let mut out: Vec<ContentLine> = Vec::new();
    for (i, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = raw.strip_prefix([' ', '\t']) {
            if let Some(prev) = out.last_mut() {
                prev.text.push_str(rest);
                continue;
            }
        }
        if raw.trim().is_empty() {
            continue;
        }
        out.push(ContentLine {
            number: i + 1,
            text: raw.to_string(),
        });
    }
    out
}

struct Property {
    name: String,
    params: Vec<(String, String)>,
    value: String,
    line: usize,
}

impl Property {
    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Split `NAME;P1=V1;P2="V:2":VALUE`. Colons and semicolons inside double
/// quotes belong to the parameter value.
fn parse_property(line: &ContentLine) -> Result<Property> {
    let mut in_quotes = false;
    let mut segments: Vec<&str> = Vec::new();
    let mut seg_start = 0;
    let mut value_start = None;

    for (i, c) in line.text.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&line.text[seg_start..i]);
                seg_start = i + 1;
            }
            ':' if !in_quotes => {
                segments.push(&line.text[seg_start..i]);
                value_start = Some(i + 1);
                break;
            }
            _ => {}
        }
    }

    let value_start = value_start.ok_or_else(|| {
        parse_error(
            line.number,
            format!("content line has no ':' separator: {:?}", line.text),
        )
    })?;

    let mut segments = segments.into_iter();
    let name = segments.next().unwrap_or_default().trim().to_ascii_uppercase();
    if name.is_empty() {
        return Err(parse_error(line.number, "content line has no name".to_string()));
    }

    let params = segments
        .filter_map(|seg| {
            let (k, v) = seg.split_once('=')?;
            Some((k.trim().to_ascii_uppercase(), v.trim().trim_matches('"').to_string()))
        })
        .collect();

    Ok(Property {
        name,
        params,
        value: line.text[value_start..].to_string(),
        line: line.number,
    })
}

fn parse_error(line: usize, message: String) -> PlannerError {
    PlannerError::Parse { line, message }
}

// ---------------------------------------------------------------------------
// VEVENT assembly
// ---------------------------------------------------------------------------

struct PendingEvent {
    begin_line: usize,
    summary: Option<String>,
    dtstart: Option<Property>,
}

impl PendingEvent {
    fn new(begin_line: usize) -> Self {
        Self {
            begin_line,
            summary: None,
            dtstart: None,
        }
    }

    fn absorb(&mut self, prop: Property) {
        match prop.name.as_str() {
            "SUMMARY" => self.summary = Some(unescape_text(&prop.value)),
            "DTSTART" => self.dtstart = Some(prop),
            _ => {}
        }
    }

    /// `Ok(None)` means the event is valid but belongs to no group.
    fn finish(self, config: &PlannerConfig) -> Result<Option<Event>> {
        let dtstart = self
            .dtstart
            .ok_or_else(|| parse_error(self.begin_line, "VEVENT without DTSTART".to_string()))?;
        let start = parse_dtstart(&dtstart, config.timezone)?;

        let Some(summary) = self.summary else {
            return Ok(None);
        };
        let Some(group_id) = group_of(&summary, config.delimiter).map(str::to_string) else {
            return Ok(None);
        };

        Ok(Some(Event {
            start,
            group_id,
            summary,
        }))
    }
}

fn parse_dtstart(prop: &Property, display: Tz) -> Result<DateTime<Utc>> {
    let raw = prop.value.trim();
    let invalid = |what: &str| parse_error(prop.line, format!("invalid DTSTART {}: {:?}", what, raw));

    let is_date = prop
        .param("VALUE")
        .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
        || (raw.len() == 8 && !raw.contains('T'));

    if is_date {
        let date = NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|_| invalid("date"))?;
        return local_midnight(&display, date)
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| invalid("date"));
    }

    if let Some(utc) = raw.strip_suffix(['Z', 'z']) {
        let naive =
            NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S").map_err(|_| invalid("date-time"))?;
        return Ok(naive.and_utc());
    }

    let naive =
        NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S").map_err(|_| invalid("date-time"))?;
    let zone = match prop.param("TZID") {
        Some(tzid) => tzid.trim_start_matches('/').parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(tzid, line = prop.line, "unknown TZID, reading time as floating");
            display
        }),
        None => display,
    };

    DstPolicy::ShiftForward
        .resolve(&zone, naive)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| invalid("local time"))
}

fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
