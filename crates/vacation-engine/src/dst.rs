//! Resolution of local wall-clock times across DST transitions.

use chrono::{Days, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

/// Policy for local times that do not map to exactly one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DstPolicy {
    /// Move a time that falls in a DST gap to the first valid instant after it
    /// (e.g. 02:30 on a spring-forward night becomes 03:00). Ambiguous times
    /// resolve to the earlier of the two instants.
    #[default]
    ShiftForward,
    /// Ambiguous and nonexistent times both yield `None`.
    Strict,
}

impl DstPolicy {
    /// Map a naive local datetime to an instant in `tz`.
    pub fn resolve<Tz: TimeZone>(
        self,
        tz: &Tz,
        local: NaiveDateTime,
    ) -> Option<chrono::DateTime<Tz>> {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earlier, _) => match self {
                DstPolicy::ShiftForward => Some(earlier),
                DstPolicy::Strict => None,
            },
            LocalResult::None => match self {
                DstPolicy::ShiftForward => shift_past_gap(tz, local),
                DstPolicy::Strict => None,
            },
        }
    }
}

/// Walk forward minute by minute until the local time exists again.
/// Real-world gaps are at most a couple of hours.
fn shift_past_gap<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<chrono::DateTime<Tz>> {
    let mut probe = local;
    for _ in 0..(24 * 60) {
        probe += TimeDelta::minutes(1);
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return Some(dt),
            LocalResult::Ambiguous(earlier, _) => return Some(earlier),
            LocalResult::None => continue,
        }
    }
    None
}

/// Local midnight at the start of `date` in `tz`.
///
/// A handful of zones have historically skipped midnight itself; those days
/// start at the first valid instant after it.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<chrono::DateTime<Tz>> {
    DstPolicy::ShiftForward.resolve(tz, date.and_time(chrono::NaiveTime::MIN))
}

/// Local midnight `days` calendar days after the date of `origin` in its zone.
///
/// The result depends only on the local date of `origin`, never its clock
/// time: an origin pushed to 01:00 by a skipped midnight still yields 00:00
/// on later days that have one. Across DST transitions the gap to `origin`
/// is 23 or 25 hours per changed day rather than a multiple of 24h.
///
/// Returns `None` once the date leaves chrono's representable range.
pub fn local_midnight_after<Tz: TimeZone>(
    origin: &chrono::DateTime<Tz>,
    days: u64,
) -> Option<chrono::DateTime<Tz>> {
    let date = origin.date_naive().checked_add_days(Days::new(days))?;
    local_midnight(&origin.timezone(), date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use chrono_tz::America::{Santiago, Toronto};

    #[test]
    fn calendar_days_land_on_midnight_across_spring_forward() {
        // 2024-03-10 is the spring-forward day in Toronto.
        let origin = local_midnight(&Toronto, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).unwrap();
        let next = local_midnight_after(&origin, 2).unwrap();
        assert_eq!(next.hour(), 0);
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!((next - origin).num_hours(), 47);
    }

    #[test]
    fn gap_time_shifts_forward() {
        let gap = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let resolved = DstPolicy::ShiftForward.resolve(&Toronto, gap).unwrap();
        assert_eq!(resolved.hour(), 3);
        assert_eq!(resolved.minute(), 0);
        assert!(DstPolicy::Strict.resolve(&Toronto, gap).is_none());
    }

    #[test]
    fn ambiguous_time_takes_earlier_instant() {
        let repeated = NaiveDate::from_ymd_opt(2024, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let resolved = DstPolicy::ShiftForward.resolve(&Toronto, repeated).unwrap();
        // Earlier instant is still on EDT (UTC-4).
        assert_eq!(resolved.naive_utc().hour(), 5);
    }

    #[test]
    fn later_days_return_to_midnight_after_a_skipped_one() {
        // Santiago skips 2024-09-08 00:00, the day starts at 01:00.
        let origin =
            local_midnight(&Santiago, NaiveDate::from_ymd_opt(2024, 9, 8).unwrap()).unwrap();
        assert_eq!(origin.hour(), 1);

        let next = local_midnight_after(&origin, 1).unwrap();
        assert_eq!(next.hour(), 0);
        assert_eq!(next.date_naive(), NaiveDate::from_ymd_opt(2024, 9, 9).unwrap());
        assert_eq!((next - origin).num_hours(), 23);
    }

    #[test]
    fn out_of_range_date_is_none() {
        let origin = local_midnight(&Toronto, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        assert!(local_midnight_after(&origin, u64::from(u32::MAX)).is_none());
    }
}
