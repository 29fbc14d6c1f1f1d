/// Date formatting for tables and detail panes (`DD/MM/YYYY`)
use chrono::{DateTime, Utc};
use contracts::shared::date::{normalize_date, DateInput};

/// Format a server date string (ISO date-time or date-only) as `DD/MM/YYYY`.
/// Unparseable input is returned unchanged.
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let normalized = normalize_date(&DateInput::from(date_str));
    match normalized.split('-').collect::<Vec<_>>().as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => date_str.to_string(),
    }
}

/// Format a timestamp as `DD/MM/YYYY HH:MM` (UTC)
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Optional timestamp, `-` when absent
pub fn format_datetime_opt(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(format_datetime).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_datetime(&dt), "31/12/2024 23:59");
        assert_eq!(format_datetime_opt(None), "-");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
    }
}
