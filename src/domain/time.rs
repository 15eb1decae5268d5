//! Backend timestamp parsing.
//!
//! The backend emits ISO-8601 timestamps, usually without an offset
//! (`2024-05-01T10:00:00.123456`). Values carrying an offset are converted
//! to UTC.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.f"))
}

fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.naive_utc()),
        Err(_) => raw.parse::<NaiveDateTime>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let naive = parse("2024-05-01T10:00:00.123456").unwrap();
        assert_eq!(naive.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        let offset = parse("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(offset.hour(), 10);

        assert!(parse("yesterday").is_err());
    }
}
