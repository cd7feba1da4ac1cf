//! Conversions between domain values and their TEXT column encodings.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

/// Formats a timestamp as fixed-width RFC 3339 in UTC, so that string order in
/// SQL matches chronological order.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored RFC 3339 timestamp. Corrupt values are logged and read as
/// the Unix epoch, which every expiry check treats as already past.
pub fn parse_timestamp(value: &str, field_name: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            DateTime::<Utc>::default()
        })
}

/// Parses a stored decimal string, falling back to zero on corrupt data.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    Decimal::from_str(value.trim()).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse {} '{}' as Decimal: {}. Falling back to ZERO.",
            field_name,
            value,
            e
        );
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_timestamp_text_sorts_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2024, 8, 9, 23, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 8, 10, 1, 0, 0).unwrap();
        assert!(format_timestamp(earlier) < format_timestamp(later));
        assert_eq!(parse_timestamp(&format_timestamp(later), "date"), later);
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        assert_eq!(parse_decimal("abc", "amount"), Decimal::ZERO);
        assert_eq!(parse_decimal(" 12.50 ", "amount"), dec!(12.50));
        assert_eq!(parse_timestamp("yesterday", "date"), DateTime::<Utc>::default());
    }
}
