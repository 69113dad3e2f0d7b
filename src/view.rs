use chrono::{Datelike, Local, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Year,
}

/// Navigation state of the calendar view.
///
/// The reference date anchors which month is displayed, `selected_year`
/// follows its year component across every transition that moves the
/// reference. The view mode only changes the prev/next step size; the grid
/// range itself is always the reference month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    reference: NaiveDate,
    mode: ViewMode,
    selected_year: i32,
    location: Option<String>,
}

impl ViewState {
    pub fn new(reference: NaiveDate) -> Self {
        ViewState {
            reference,
            mode: ViewMode::Month,
            selected_year: reference.year(),
            location: None,
        }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn prev(&mut self) {
        self.step_months_back(self.step());
    }

    pub fn next(&mut self) {
        self.step_months_forward(self.step());
    }

    pub fn go_to_today(&mut self) {
        self.reference = Local::now().date_naive();
        self.sync_year();
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Replaces the year component, preserving month and day-of-month.
    /// A Feb 29 reference clamps to Feb 28 when the target year is not a
    /// leap year, so the displayed month never changes.
    pub fn set_year(&mut self, year: i32) {
        self.reference = self.reference.with_year(year).unwrap_or_else(|| {
            self.reference
                .with_day(28)
                .and_then(|date| date.with_year(year))
                .unwrap()
        });
        self.sync_year();
    }

    pub fn set_location(&mut self, location: Option<String>) {
        self.location = location;
    }

    fn step(&self) -> u32 {
        match self.mode {
            ViewMode::Month => 1,
            ViewMode::Year => 12,
        }
    }

    fn step_months_forward(&mut self, months: u32) {
        if let Some(date) = self.reference.checked_add_months(Months::new(months)) {
            self.reference = date;
            self.sync_year();
        }
    }

    fn step_months_back(&mut self, months: u32) {
        if let Some(date) = self.reference.checked_sub_months(Months::new(months)) {
            self.reference = date;
            self.sync_year();
        }
    }

    fn sync_year(&mut self) {
        self.selected_year = self.reference.year();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn prev_next_round_trips_month() {
        let mut state = ViewState::new(date(2024, 7, 15));
        state.prev();
        assert_eq!(state.reference(), date(2024, 6, 15));
        state.next();
        assert_eq!(state.reference().month(), 7);
        assert_eq!(state.reference().year(), 2024);
    }

    #[test]
    fn prev_rolls_over_year_boundary() {
        let mut state = ViewState::new(date(2024, 1, 10));
        state.prev();
        assert_eq!(state.reference(), date(2023, 12, 10));
        assert_eq!(state.selected_year(), 2023);
        state.next();
        assert_eq!(state.selected_year(), 2024);
    }

    #[test]
    fn month_end_clamps_when_stepping() {
        let mut state = ViewState::new(date(2024, 1, 31));
        state.next();
        assert_eq!(state.reference(), date(2024, 2, 29));
    }

    #[test]
    fn year_mode_steps_whole_years() {
        let mut state = ViewState::new(date(2024, 5, 20));
        state.set_mode(ViewMode::Year);
        state.prev();
        assert_eq!(state.reference(), date(2023, 5, 20));
        state.next();
        assert_eq!(state.reference(), date(2024, 5, 20));
    }

    #[test]
    fn year_step_from_leap_day_clamps() {
        let mut state = ViewState::new(date(2024, 2, 29));
        state.set_mode(ViewMode::Year);
        state.next();
        assert_eq!(state.reference(), date(2025, 2, 28));
    }

    #[test]
    fn set_mode_keeps_reference() {
        let mut state = ViewState::new(date(2024, 3, 3));
        state.set_mode(ViewMode::Year);
        assert_eq!(state.reference(), date(2024, 3, 3));
        assert_eq!(state.mode(), ViewMode::Year);
    }

    #[test]
    fn set_year_preserves_month_and_day() {
        let mut state = ViewState::new(date(2024, 8, 12));
        state.set_year(1999);
        assert_eq!(state.reference(), date(1999, 8, 12));
        assert_eq!(state.selected_year(), 1999);
    }

    #[test]
    fn set_year_clamps_leap_day() {
        let mut state = ViewState::new(date(2024, 2, 29));
        state.set_year(2023);
        assert_eq!(state.reference(), date(2023, 2, 28));
    }

    #[test]
    fn go_to_today_keeps_mode() {
        let mut state = ViewState::new(date(1999, 1, 1));
        state.set_mode(ViewMode::Year);
        state.go_to_today();
        assert_eq!(state.mode(), ViewMode::Year);
        assert_eq!(state.selected_year(), state.reference().year());
    }

    #[test]
    fn location_starts_empty() {
        let mut state = ViewState::new(date(2024, 1, 1));
        assert_eq!(state.location(), None);
        state.set_location(Some("US".to_owned()));
        assert_eq!(state.location(), Some("US"));
    }
}
