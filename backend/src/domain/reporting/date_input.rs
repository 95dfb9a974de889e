//! Lenient parsing of caller-supplied date strings.
//!
//! Accepted shapes, tried in order:
//! - RFC 3339 instants (`2024-02-29T23:59:59.999Z`, `...+02:00`);
//! - naive date-times (`2024-02-29T23:59:59[.fff]`), read in the engine offset;
//! - bare dates (`2024-02-29`), read as UTC midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an instant, returning `None` for anything unrecognised.
pub(crate) fn parse_instant(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.with_timezone(&Utc));
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok());
    if let Some(local) = naive {
        return local_to_utc(local, offset);
    }

    parse_date(trimmed).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Convert a wall-clock reading in `offset` to UTC.
///
/// `None` only when the shift leaves chrono's representable range.
pub(crate) fn local_to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local
        .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| utc.and_utc())
}
