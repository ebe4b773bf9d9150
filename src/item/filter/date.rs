use chrono::NaiveDate;

/// Format of the `BD` and `ED` attributes.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date. Anything else, including impossible calendar dates,
/// gives `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
