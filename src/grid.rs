use chrono::{Datelike, Duration, NaiveDate};
use itertools::Itertools;

/// One slot of the month grid: either a concrete day of the displayed month
/// or a filler for a leading/trailing day of an adjacent month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Day(NaiveDate),
    Empty,
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Day(date) => Some(*date),
            CalendarCell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CalendarCell::Empty)
    }
}

/// A single grid row, always 7 cells, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week([CalendarCell; 7]);

impl Week {
    pub fn cells(&self) -> &[CalendarCell; 7] {
        &self.0
    }
}

pub fn last_of_month(reference: NaiveDate) -> NaiveDate {
    let first_of_next = if reference.month() == 12 {
        NaiveDate::from_ymd_opt(reference.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(reference.year(), reference.month() + 1, 1)
    };

    // Both branches construct the first of a valid month.
    first_of_next.and_then(|date| date.pred_opt()).unwrap()
}

/// Builds the month grid for the month containing `reference`.
///
/// The covered range runs from the Sunday on/before the first of the month
/// to the Saturday on/after its last day, walked in ascending order and
/// chunked into rows of 7. Days outside the reference month occupy their
/// slot as [`CalendarCell::Empty`]. Depending on the month this yields 4,
/// 5 or 6 rows.
pub fn month_weeks(reference: NaiveDate) -> Vec<Week> {
    let first = reference.with_day(1).unwrap();
    let last = last_of_month(reference);

    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

    let cells = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            if day.month() == reference.month() && day.year() == reference.year() {
                CalendarCell::Day(day)
            } else {
                CalendarCell::Empty
            }
        });

    let rows = cells.chunks(7);
    rows.into_iter()
        .map(|row| {
            let mut week = [CalendarCell::Empty; 7];
            for (slot, cell) in week.iter_mut().zip(row) {
                *slot = cell;
            }
            Week(week)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn concrete_dates(weeks: &[Week]) -> Vec<NaiveDate> {
        weeks
            .iter()
            .flat_map(|week| week.cells().iter().filter_map(CalendarCell::date))
            .collect()
    }

    #[test]
    fn every_month_yields_complete_weeks() {
        for month in 1..=12 {
            let weeks = month_weeks(date(2023, month, 15));
            assert!(!weeks.is_empty());
            let cells: usize = weeks.iter().map(|week| week.cells().len()).sum();
            assert_eq!(cells % 7, 0, "month {} not a multiple of 7", month);
        }
    }

    #[test]
    fn concrete_cells_stay_in_reference_month() {
        let weeks = month_weeks(date(2024, 8, 30));
        for day in concrete_dates(&weeks) {
            assert_eq!(day.month(), 8);
            assert_eq!(day.year(), 2024);
        }
    }

    #[test]
    fn covers_whole_month_in_order() {
        let weeks = month_weeks(date(2024, 8, 1));
        let days = concrete_dates(&weeks);
        assert_eq!(days.len(), 31);
        assert_eq!(days.first(), Some(&date(2024, 8, 1)));
        assert_eq!(days.last(), Some(&date(2024, 8, 31)));
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn weeks_start_on_sunday() {
        let weeks = month_weeks(date(2024, 8, 1));
        for week in &weeks {
            for (idx, cell) in week.cells().iter().enumerate() {
                if let Some(day) = cell.date() {
                    assert_eq!(day.weekday().num_days_from_sunday() as usize, idx);
                }
            }
        }
    }

    #[test]
    fn february_2015_fits_four_rows() {
        // Feb 2015: 28 days, the 1st is a Sunday.
        assert_eq!(month_weeks(date(2015, 2, 10)).len(), 4);
    }

    #[test]
    fn august_2026_needs_six_rows() {
        // 31 days with the 1st on a Saturday.
        assert_eq!(month_weeks(date(2026, 8, 30)).len(), 6);
    }

    #[test]
    fn leap_day_present_only_in_leap_years() {
        let feb_2024 = concrete_dates(&month_weeks(date(2024, 2, 1)));
        assert!(feb_2024.contains(&date(2024, 2, 29)));

        let feb_2023 = concrete_dates(&month_weeks(date(2023, 2, 1)));
        assert!(!feb_2023.iter().any(|day| day.day() == 29));
    }

    #[test]
    fn december_extends_into_next_january() {
        let weeks = month_weeks(date(2024, 12, 31));
        let last_week = weeks.last().unwrap();
        // Dec 31st 2024 is a Tuesday, so the last row has trailing fillers.
        assert!(last_week.cells().iter().any(CalendarCell::is_empty));
        let days = concrete_dates(&weeks);
        assert_eq!(days.last(), Some(&date(2024, 12, 31)));
    }

    #[test]
    fn last_of_month_handles_year_end() {
        assert_eq!(last_of_month(date(2024, 12, 5)), date(2024, 12, 31));
        assert_eq!(last_of_month(date(2024, 2, 5)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 2, 5)), date(2023, 2, 28));
    }
}
