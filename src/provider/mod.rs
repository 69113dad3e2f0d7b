use chrono::NaiveDate;
use serde::Deserialize;

pub mod error;
mod rest;

pub use error::{Error, ErrorKind, Result};
pub use rest::RestClient;

/// One public-holiday record as returned by the provider. The date is kept
/// in provider-native form and only interpreted through [`Holiday::day`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    pub date: String,
    pub name: String,
}

impl Holiday {
    /// The record's calendar day, or `None` if the stored date does not
    /// parse in any accepted provider format. Malformed records therefore
    /// never match any cell.
    pub fn day(&self) -> Option<NaiveDate> {
        normalize_date(&self.date)
    }
}

/// A selectable country: ISO code plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOption {
    pub value: String,
    pub label: String,
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parses a provider date string into a canonical day. A trailing time
/// component ("2024-01-01T00:00:00" or "2024-01-01 00:00") is ignored.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let raw = raw.split(|c| c == 'T' || c == ' ').next().unwrap_or(raw);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// All holidays falling on `day`, in input order. Zero, one or many matches
/// are all valid; records with unparsable dates are skipped.
pub fn holidays_on(day: NaiveDate, holidays: &[Holiday]) -> Vec<&Holiday> {
    holidays
        .iter()
        .filter(|holiday| holiday.day() == Some(day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holiday(date: &str, name: &str) -> Holiday {
        Holiday {
            date: date.to_owned(),
            name: name.to_owned(),
        }
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn matches_exactly_one_record() {
        let holidays = vec![
            holiday("2022-02-01", "Holiday 1"),
            holiday("2022-02-05", "Holiday 2"),
        ];

        let matched = holidays_on(day(2022, 2, 1), &holidays);
        assert_eq!(matched, vec![&holidays[0]]);
    }

    #[test]
    fn matches_nothing_off_by_one() {
        let holidays = vec![holiday("2022-02-01", "Holiday 1")];
        assert!(holidays_on(day(2022, 2, 2), &holidays).is_empty());
    }

    #[test]
    fn multiple_matches_keep_input_order() {
        let holidays = vec![
            holiday("2024-12-25", "Christmas Day"),
            holiday("2024-01-01", "New Year"),
            holiday("2024-12-25", "Family Day"),
        ];

        let matched = holidays_on(day(2024, 12, 25), &holidays);
        assert_eq!(matched, vec![&holidays[0], &holidays[2]]);
    }

    #[test]
    fn provider_native_formats_normalize() {
        assert_eq!(normalize_date("2024/05/01"), Some(day(2024, 5, 1)));
        assert_eq!(normalize_date("05/01/2024"), Some(day(2024, 5, 1)));
        assert_eq!(normalize_date("01.05.2024"), Some(day(2024, 5, 1)));
        assert_eq!(
            normalize_date("2024-05-01T00:00:00"),
            Some(day(2024, 5, 1))
        );
        assert_eq!(normalize_date(" 2024-05-01 "), Some(day(2024, 5, 1)));
    }

    #[test]
    fn slash_format_matches_dash_cell() {
        let holidays = vec![holiday("2022/02/01", "Holiday 1")];
        assert_eq!(holidays_on(day(2022, 2, 1), &holidays).len(), 1);
    }

    #[test]
    fn malformed_dates_never_match() {
        assert_eq!(normalize_date("not-a-date"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("2024-13-40"), None);

        let holidays = vec![holiday("not-a-date", "Broken")];
        for offset in 0..366 {
            let probe = day(2024, 1, 1) + chrono::Duration::days(offset);
            assert!(holidays_on(probe, &holidays).is_empty());
        }
    }
}
