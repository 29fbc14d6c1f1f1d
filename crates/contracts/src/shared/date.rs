//! Date normalization for form fields and lenient timestamp parsing for
//! server records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Any representation a scheduled date can arrive in
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Text(String),
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

/// Normalize to `YYYY-MM-DD`.
///
/// Date-times are taken in UTC. Text is accepted as RFC 3339, as a naive
/// `YYYY-MM-DDTHH:MM[:SS]` or as a plain date; anything else yields an
/// empty string.
pub fn normalize_date(input: &DateInput) -> String {
    match input {
        DateInput::DateTime(dt) => dt.date_naive().format("%Y-%m-%d").to_string(),
        DateInput::Date(d) => d.format("%Y-%m-%d").to_string(),
        DateInput::Text(text) => parse_date_text(text)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    let date_part = text.split('T').next().unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Strict `YYYY-MM-DD` check used by validators
pub fn is_valid_date(value: &str) -> bool {
    let value = value.trim();
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a server timestamp.
///
/// RFC 3339 keeps its offset; a naive date-time is taken as UTC and a plain
/// date as midnight UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive))
}

/// `deserialize_with` adapter for optional timestamps.
///
/// Accepts strings in any form [`parse_timestamp`] reads, and Mongo's
/// `{"$date": ...}` wrapper. Unreadable values become `None` instead of
/// failing the whole record.
pub mod lenient_timestamp {
    use super::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(from_value))
    }

    fn from_value(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(text) => parse_timestamp(text),
            Value::Object(map) => map.get("$date").and_then(from_value),
            _ => None,
        }
    }
}

/// `deserialize_with` adapter for optional numbers that may arrive as text
/// (`"1.5"`, `"1,5"`). Anything else becomes `None`.
pub mod lenient_number {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(text)) => text.trim().replace(',', ".").parse().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_all_inputs_normalize_to_same_day() {
        let as_datetime = DateInput::from(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        let as_iso = DateInput::from("2024-05-01T10:00:00Z");
        let as_date_only = DateInput::from("2024-05-01");

        assert_eq!(normalize_date(&as_datetime), "2024-05-01");
        assert_eq!(normalize_date(&as_iso), "2024-05-01");
        assert_eq!(normalize_date(&as_date_only), "2024-05-01");
    }

    #[test]
    fn test_offset_is_converted_to_utc() {
        let late_evening = DateInput::from("2024-05-01T23:30:00-03:00");
        assert_eq!(normalize_date(&late_evening), "2024-05-02");
    }

    #[test]
    fn test_naive_datetime_and_garbage() {
        assert_eq!(normalize_date(&DateInput::from("2024-05-01T10:00")), "2024-05-01");
        assert_eq!(normalize_date(&DateInput::from("mañana")), "");
        assert_eq!(normalize_date(&DateInput::from("")), "");
    }

    #[test]
    fn test_parse_timestamp_without_timezone() {
        let expected = Utc.with_ymd_and_hms(2024, 4, 20, 8, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-04-20T08:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-04-20T08:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-04-20T08:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-04-20 08:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-04-20"),
            Some(Utc.with_ymd_and_hms(2024, 4, 20, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("ayer"), None);
    }

    #[derive(serde::Deserialize)]
    struct Stamped {
        #[serde(default, deserialize_with = "lenient_timestamp::deserialize")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "lenient_number::deserialize")]
        hours: Option<f64>,
    }

    #[test]
    fn test_lenient_adapters() {
        let parsed: Stamped =
            serde_json::from_str(r#"{"at":{"$date":"2024-04-20T08:00:00"},"hours":"1,5"}"#)
                .unwrap();
        assert!(parsed.at.is_some());
        assert_eq!(parsed.hours, Some(1.5));

        let parsed: Stamped = serde_json::from_str(r#"{"at":12345,"hours":"mucho"}"#).unwrap();
        assert_eq!(parsed.at, None);
        assert_eq!(parsed.hours, None);

        let parsed: Stamped = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(parsed.at, None);
        assert_eq!(parsed.hours, None);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("2024-5-1"));
    }
}
