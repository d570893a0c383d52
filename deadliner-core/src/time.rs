//! Calendar-date utilities. Everything in the engine works on `NaiveDate`;
//! a wall clock is only consulted at the edge to resolve "today".

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{PlannerError, PlannerResult};

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> PlannerResult<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return Err(PlannerError::invalid("due date is required"));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        PlannerError::invalid(format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
    })
}

/// Whole days from `today` to `date`; negative when `date` is in the past.
pub fn days_between(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// `today + n` days.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// The calendar date at `now` in an IANA zone like "America/Chicago".
pub fn today_in(tz: &str, now: DateTime<Utc>) -> PlannerResult<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| PlannerError::invalid(format!("invalid timezone: {tz}")))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// US-style short date (`m/d/yyyy`) used in plain-text exports.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_iso_calendar_date() {
        let d = parse_date("2026-02-20").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
    }

    #[test]
    fn rejects_blank_and_malformed_dates() {
        assert!(parse_date("").is_err());
        assert!(parse_date("02/20/2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn days_between_is_signed() {
        let a = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(days_between(a, b), 10);
        assert_eq!(days_between(b, a), -10);
        assert_eq!(add_days(a, 10), b);
    }

    #[test]
    fn today_depends_on_zone() {
        // 03:00 UTC on Feb 21 is still Feb 20 in Chicago (UTC-6).
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 3, 0, 0).unwrap();
        let chicago = today_in("America/Chicago", now).unwrap();
        assert_eq!(chicago, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        let tokyo = today_in("Asia/Tokyo", now).unwrap();
        assert_eq!(tokyo, NaiveDate::from_ymd_opt(2026, 2, 21).unwrap());
        assert!(today_in("Mars/Olympus", now).is_err());
    }

    #[test]
    fn short_date_has_no_padding() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_short_date(d), "3/5/2026");
    }
}
