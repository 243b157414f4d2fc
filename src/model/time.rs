//! Text forms of the timestamps stored on a worker.
//!
//! Local date-times use the ISO form `YYYY-MM-DDTHH:MM[:SS[.fff]]`. Zoned date-times use
//! RFC 3339; a trailing bracketed zone name (`+03:00[Europe/Moscow]`) is accepted and
//! ignored because only the offset is kept.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const LOCAL_OUTPUT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LOCAL_SHORT: &str = "%Y-%m-%dT%H:%M";
const ZONED_SHORT: &str = "%Y-%m-%dT%H:%M%:z";

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    input.trim().parse().ok()
}

pub fn parse_local(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    input
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(input, LOCAL_SHORT).ok())
}

pub fn parse_zoned(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    let input = match input.find('[') {
        Some(bracket) if input.ends_with(']') => &input[..bracket],
        _ => input,
    };
    DateTime::parse_from_rfc3339(input)
        .ok()
        .or_else(|| DateTime::parse_from_str(input, ZONED_SHORT).ok())
}

pub fn format_local(value: &NaiveDateTime) -> String {
    value.format(LOCAL_OUTPUT).to_string()
}

pub fn format_zoned(value: &DateTime<FixedOffset>) -> String {
    value.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_accepts_iso_with_and_without_seconds() {
        let full = parse_local("2001-02-03T04:05:06").unwrap();
        assert_eq!(format_local(&full), "2001-02-03T04:05:06");
        let short = parse_local("2001-02-03T04:05").unwrap();
        assert_eq!(format_local(&short), "2001-02-03T04:05:00");
        assert!(parse_local("03.02.2001").is_none());
    }

    #[test]
    fn zoned_keeps_offset_and_drops_zone_name() {
        let value = parse_zoned("2020-05-01T09:30:00+03:00[Europe/Moscow]").unwrap();
        assert_eq!(value.offset().local_minus_utc(), 3 * 3600);
        assert_eq!(parse_zoned(&format_zoned(&value)), Some(value));
        assert!(parse_zoned("2020-05-01T09:30+03:00").is_some());
        assert!(parse_zoned("2020-05-01T09:30:00").is_none());
    }

    #[test]
    fn dates_round_trip_through_display() {
        let date = parse_date("2024-12-31").unwrap();
        assert_eq!(date.to_string(), "2024-12-31");
    }
}
