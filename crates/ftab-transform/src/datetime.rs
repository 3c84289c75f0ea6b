//! Date normalization.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ftab_model::{CellNormalizer, CellValue};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",  // 15-Jan-2024
    "%d-%B-%Y",  // 15-January-2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%m/%d/%Y",  // US: 01/15/2024
    "%d.%m.%Y",  // German: 15.01.2024
    "%Y%m%d",    // Compact: 20240115
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
];

/// Parses common date and datetime layouts. Dates land on midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// A datetime cell, or `default` when the value is not a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Date {
    pub default: Option<NaiveDateTime>,
}

impl CellNormalizer for Date {
    fn normalize(&self, value: &CellValue) -> CellValue {
        let parsed = match value {
            CellValue::DateTime(dt) => Some(*dt),
            CellValue::Text(s) => parse_datetime(s),
            _ => None,
        };
        parsed.or(self.default).map_or(CellValue::Empty, CellValue::DateTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, 0))
            .unwrap()
    }

    #[test]
    fn parses_dates_and_datetimes() {
        assert_eq!(parse_datetime("2013-08-02"), Some(at(2013, 8, 2, 0, 0)));
        assert_eq!(parse_datetime(" 2013-08-02 14:30 "), Some(at(2013, 8, 2, 14, 30)));
        assert_eq!(parse_datetime("15-Jan-2024"), Some(at(2024, 1, 15, 0, 0)));
        assert_eq!(parse_datetime("01/15/2024"), Some(at(2024, 1, 15, 0, 0)));
        assert_eq!(parse_datetime("soon"), None);
    }

    #[test]
    fn date_normalizer_passes_datetimes_through() {
        let dt = at(2020, 2, 29, 9, 0);
        assert_eq!(Date::default().normalize(&CellValue::DateTime(dt)), CellValue::DateTime(dt));
    }

    #[test]
    fn date_normalizer_default() {
        let fallback = at(1970, 1, 1, 0, 0);
        let normalizer = Date {
            default: Some(fallback),
        };
        assert_eq!(normalizer.normalize(&CellValue::Int(3)), CellValue::DateTime(fallback));
        assert_eq!(Date::default().normalize(&CellValue::text("n/a")), CellValue::Empty);
    }
}
