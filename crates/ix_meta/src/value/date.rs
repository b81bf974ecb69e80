use alloc::string::{String, ToString};
use core::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, ParseError, TimeZone};

/// `Y-m-d\TH:i:sP`, e.g. `2021-03-04T05:06:07+00:00`.
pub const ATOM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Formats a date with [`ATOM_FORMAT`].
pub fn format_atom<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format(ATOM_FORMAT).to_string()
}

/// Parses an import date string.
///
/// Accepts RFC 3339 (which covers the atom format), then the offset-less
/// `Y-m-d H:i:s` and `Y-m-d` forms, which are read as UTC.
pub fn parse_datetime(input: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(input).or_else(|err| {
        NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| {
                NaiveDate::parse_from_str(input, "%Y-%m-%d").map(|day| day.and_time(NaiveTime::MIN))
            })
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_| err)
    })
}

#[cfg(test)]
mod tests {
    use super::{format_atom, parse_datetime};
    use chrono::{Datelike, Timelike};

    #[test]
    fn atom_round_trip() {
        let date = parse_datetime("2021-03-04T05:06:07+02:00").unwrap();
        assert_eq!(format_atom(&date), "2021-03-04T05:06:07+02:00");
    }

    #[test]
    fn offsetless_forms_are_utc() {
        let date = parse_datetime("2020-01-02 03:04:05").unwrap();
        assert_eq!(format_atom(&date), "2020-01-02T03:04:05+00:00");

        let day = parse_datetime("2020-01-02").unwrap();
        assert_eq!((day.year(), day.month(), day.day(), day.hour()), (2020, 1, 2, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_datetime("yesterday").is_err());
        assert!(parse_datetime("").is_err());
    }
}
