//! Display helpers for sizes, timestamps and identifiers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone, Utc};
use url::Url;

const SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Identifiers shorter than this are displayed whole
pub const MIN_TRUNCATED_LEN: usize = 12;
const EDGE_LEN: usize = 6;

/// Human readable size using base-1024 units, two decimal places.
///
/// ```
/// use common::format::format_file_size;
/// assert_eq!(format_file_size(1024), "1.00 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    // 1023.995 and up would print as "1024.00"
    if (size * 100.0).round() >= 102_400.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Date only
    Date,
    /// Date and time of day
    DateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date format {0:?}, expected \"date\" or \"datetime\"")]
pub struct UnknownDateFormat(String);

impl FromStr for DateFormat {
    type Err = UnknownDateFormat;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(DateFormat::Date),
            "datetime" => Ok(DateFormat::DateTime),
            other => Err(UnknownDateFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::Date => f.write_str("date"),
            DateFormat::DateTime => f.write_str("datetime"),
        }
    }
}

impl DateFormat {
    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Date => "%Y-%m-%d",
            DateFormat::DateTime => "%Y-%m-%d %H:%M:%S",
        }
    }
}

/// Render a timestamp in the local time zone
pub fn format_date(timestamp: DateTime<Utc>, format: DateFormat) -> String {
    format_date_in(timestamp, format, &Local)
}

/// Render a timestamp in an explicit time zone
pub fn format_date_in<Tz>(timestamp: DateTime<Utc>, format: DateFormat, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format(format.pattern())
        .to_string()
}

/// Shorten an identifier to its first and last six characters.
///  Identifiers shorter than [`MIN_TRUNCATED_LEN`] are returned unchanged.
pub fn format_identifier(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() < MIN_TRUNCATED_LEN {
        return id.to_string();
    }
    let head: String = chars[..EDGE_LEN].iter().collect();
    let tail: String = chars[chars.len() - EDGE_LEN..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Link to a content identifier on an HTTP gateway
pub fn gateway_url(gateway: &Url, cid: &str) -> Result<Url, url::ParseError> {
    gateway.join(&format!("/ipfs/{}", cid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    /// Split "12.34 KB" into its number and unit
    fn parts(formatted: &str) -> (f64, &str) {
        let (number, unit) = formatted.split_once(' ').unwrap();
        (number.parse().unwrap(), unit)
    }

    #[test]
    fn test_format_file_size_boundaries() {
        assert_eq!(format_file_size(0), "0.00 B");
        assert_eq!(format_file_size(1), "1.00 B");
        assert_eq!(format_file_size(1023), "1023.00 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5.00 GB");
        assert_eq!(format_file_size(u64::MAX), "16.00 EB");
    }

    #[test]
    fn test_format_file_size_rounding_carries_into_next_unit() {
        assert_eq!(format_file_size(1_048_575), "1.00 MB");
        assert_eq!(format_file_size(1_048_570), "1023.99 KB");
        assert_eq!(format_file_size((1 << 30) - 1), "1.00 GB");

        for bytes in [1_048_575u64, (1 << 30) - 1, (1 << 40) - 1] {
            let (number, _) = parts(&format_file_size(bytes));
            assert!(number < 1024.0, "{} -> {}", bytes, number);
        }
    }

    #[test]
    fn test_format_file_size_unit_matches_magnitude() {
        let samples = [
            0u64,
            7,
            1000,
            4096,
            1_000_000,
            123_456_789,
            9_876_543_210,
            1 << 40,
            3 << 50,
            1 << 62,
        ];
        for bytes in samples {
            let formatted = format_file_size(bytes);
            let (number, unit) = parts(&formatted);
            assert!((0.0..1024.0).contains(&number), "{} -> {}", bytes, number);

            let expected = if bytes < 1024 {
                0
            } else {
                (63 - bytes.leading_zeros() as usize) / 10
            };
            assert_eq!(unit, SIZE_UNITS[expected], "unit for {}", bytes);
        }
    }

    #[test]
    fn test_format_identifier() {
        assert_eq!(format_identifier("abcdefghijklmnop"), "abcdef...klmnop");
        assert_eq!(format_identifier("abcdefghijkl"), "abcdef...ghijkl");
        assert_eq!(format_identifier("abcdefghijk"), "abcdefghijk");
        assert_eq!(format_identifier(""), "");
    }

    #[test]
    fn test_format_identifier_counts_characters() {
        let id = "ééééééxxxxxxüüüüüü";
        assert_eq!(format_identifier(id), "éééééé...üüüüüü");
    }

    #[test]
    fn test_format_date() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T23:30:05Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(format_date_in(ts, DateFormat::Date, &Utc), "2024-03-01");
        assert_eq!(
            format_date_in(ts, DateFormat::DateTime, &Utc),
            "2024-03-01 23:30:05"
        );

        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_date_in(ts, DateFormat::Date, &east), "2024-03-02");

        let local = format_date(ts, DateFormat::DateTime);
        assert!(local.starts_with(&format_date(ts, DateFormat::Date)));
    }

    #[test]
    fn test_date_format_parse() {
        assert_eq!("date".parse::<DateFormat>().unwrap(), DateFormat::Date);
        assert_eq!(
            "datetime".parse::<DateFormat>().unwrap(),
            DateFormat::DateTime
        );
        assert!("time".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_gateway_url() {
        let gateway = Url::parse("https://ipfs.io").unwrap();
        assert_eq!(
            gateway_url(&gateway, "bafyfile").unwrap().as_str(),
            "https://ipfs.io/ipfs/bafyfile"
        );
    }
}
