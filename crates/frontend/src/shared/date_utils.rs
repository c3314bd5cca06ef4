/// Utilities for date and time formatting
///
/// Dates are shown as DD/MM/YYYY (es-CL); `<input type="date">` works with YYYY-MM-DD.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Format a date as DD/MM/YYYY
/// Example: 2026-03-15 -> "15/03/2026"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a UTC timestamp as DD/MM/YYYY HH:MM
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Optional date, "-" when absent
pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Parse the value of an `<input type="date">`; empty means "no bound"
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Value for an `<input type="date">`
pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Parse an `<input type="datetime-local">` value (browser local time) into UTC
pub fn parse_datetime_input(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(format_date(d), "15/03/2026");
        assert_eq!(format_date_opt(None), "-");
    }

    #[test]
    fn test_format_datetime() {
        let dt = DateTime::parse_from_rfc3339("2024-03-15T14:02:26.123Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_datetime(dt), "15/03/2024 14:02");
    }

    #[test]
    fn test_date_input_round_trip() {
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("invalid"), None);
        let d = parse_date_input("2026-10-17").unwrap();
        assert_eq!(date_input_value(Some(d)), "2026-10-17");
        assert_eq!(date_input_value(None), "");
    }

    #[test]
    fn test_parse_datetime_input() {
        assert_eq!(parse_datetime_input(" "), None);
        assert_eq!(parse_datetime_input("2026-10-17"), None);
        let dt = parse_datetime_input("2026-10-17T09:30").unwrap();
        assert_eq!(dt.with_timezone(&Local).format("%H:%M").to_string(), "09:30");
    }
}
