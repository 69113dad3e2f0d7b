use chrono::prelude::*;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

use crate::provider::{CountryOption, Holiday};
use crate::view::ViewState;

#[derive(Clone, Debug)]
pub enum Mode {
    Normal,
    Pick,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub title_style: StyleModifier,
    pub header_style: StyleModifier,
    pub day_style: StyleModifier,
    pub empty_style: StyleModifier,
    pub today_style: StyleModifier,
    pub holiday_style: StyleModifier,
    pub bar_style: StyleModifier,
    pub selection_style: StyleModifier,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            title_style: StyleModifier::default().fg_color(Color::Yellow),
            header_style: StyleModifier::default().fg_color(Color::Yellow),
            day_style: StyleModifier::default(),
            empty_style: StyleModifier::default().fg_color(Color::Blue),
            today_style: StyleModifier::default().invert(true),
            holiday_style: StyleModifier::default().fg_color(Color::Cyan),
            bar_style: StyleModifier::default().fg_color(Color::Green),
            selection_style: StyleModifier::default().invert(true),
        }
    }

    pub fn light() -> Self {
        Theme {
            title_style: StyleModifier::default().fg_color(Color::Blue),
            header_style: StyleModifier::default().fg_color(Color::Blue),
            day_style: StyleModifier::default(),
            empty_style: StyleModifier::default().fg_color(Color::White),
            today_style: StyleModifier::default().invert(true),
            holiday_style: StyleModifier::default().fg_color(Color::Magenta),
            bar_style: StyleModifier::default().fg_color(Color::Blue),
            selection_style: StyleModifier::default().invert(true),
        }
    }
}

pub struct PickerState {
    pub search: PromptLine,
    pub index: usize,
}

impl Default for PickerState {
    fn default() -> Self {
        PickerState {
            search: PromptLine::with_prompt("search: ".to_owned()),
            index: 0,
        }
    }
}

/// All mutable state of the running view: navigation, fetched data, theme
/// and interaction mode. Only the UI thread touches it, always through the
/// methods below.
pub struct Context {
    pub mode: Mode,
    theme: Theme,
    dark: bool,
    view: ViewState,
    countries: Vec<CountryOption>,
    holidays: Vec<Holiday>,
    holiday_token: u64,
    fetched: Option<(String, i32)>,
    picker: PickerState,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(view: ViewState) -> Self {
        Context {
            mode: Mode::Normal,
            theme: Theme::dark(),
            dark: true,
            view,
            countries: Vec::new(),
            holidays: Vec::new(),
            holiday_token: 0,
            fetched: None,
            picker: PickerState::default(),
            now: Local::now(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
        self.theme = if self.dark {
            Theme::dark()
        } else {
            Theme::light()
        };
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    pub fn countries(&self) -> &[CountryOption] {
        &self.countries
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn now(&self) -> &DateTime<Local> {
        &self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Display name of the selected country, falling back to the bare code
    /// while the country list has not arrived yet.
    pub fn country_label(&self) -> Option<&str> {
        let code = self.view.location()?;
        Some(
            self.countries
                .iter()
                .find(|country| country.value == code)
                .map(|country| country.label.as_str())
                .unwrap_or(code),
        )
    }

    pub fn apply_countries(&mut self, countries: Vec<CountryOption>) {
        self.countries = countries;
        self.picker.index = 0;
    }

    /// Installs a holiday response if it belongs to the current request
    /// generation; stale responses are dropped.
    pub fn apply_holidays(&mut self, token: u64, holidays: Vec<Holiday>) {
        if token == self.holiday_token {
            self.holidays = holidays;
        } else {
            log::debug!("dropping stale holiday response (token {})", token);
        }
    }

    /// The (country, year) pair that should be fetched next, if it differs
    /// from what the current holiday data belongs to.
    pub fn pending_holiday_request(&self) -> Option<(String, i32)> {
        let country = self.view.location()?.to_owned();
        let year = self.view.reference().year();
        let target = (country, year);

        if self.fetched.as_ref() == Some(&target) {
            None
        } else {
            Some(target)
        }
    }

    /// Marks `target` as in flight and returns the token its response has
    /// to carry.
    pub fn begin_holiday_request(&mut self, target: (String, i32)) -> u64 {
        self.holiday_token += 1;
        self.fetched = Some(target);
        self.holiday_token
    }

    pub fn picker(&self) -> &PickerState {
        &self.picker
    }

    pub fn picker_line_mut(&mut self) -> &mut PromptLine {
        &mut self.picker.search
    }

    pub fn open_picker(&mut self) {
        self.mode = Mode::Pick;
        self.picker.index = 0;
    }

    pub fn close_picker(&mut self) {
        self.mode = Mode::Normal;
        let _ = self.picker.search.finish_line();
        self.picker.index = 0;
    }

    /// Countries whose label contains the picker's search text,
    /// case-insensitively, in display order.
    pub fn filtered_countries(&self) -> Vec<&CountryOption> {
        Self::filter_countries(&self.countries, self.picker.search.active_line())
    }

    fn filter_countries<'a>(countries: &'a [CountryOption], search: &str) -> Vec<&'a CountryOption> {
        let needle = search.to_lowercase();
        countries
            .iter()
            .filter(|country| country.label.to_lowercase().contains(&needle))
            .collect()
    }

    /// Applies the picker selection as the new location and leaves pick
    /// mode. An empty filtered list only closes the picker.
    pub fn confirm_pick(&mut self) {
        self.clamp_pick_selection();
        let choice = self
            .filtered_countries()
            .get(self.picker.index)
            .map(|country| country.value.clone());

        if let Some(code) = choice {
            self.view.set_location(Some(code));
        }

        self.close_picker();
    }

    pub fn move_pick_selection(&mut self, down: bool) -> bool {
        self.clamp_pick_selection();
        let count = self.filtered_countries().len();
        if down {
            if self.picker.index + 1 < count {
                self.picker.index += 1;
                return true;
            }
        } else if self.picker.index > 0 {
            self.picker.index -= 1;
            return true;
        }
        false
    }

    /// Keeps the selection inside the filtered list. Editing the search
    /// text can shrink the list underneath a previously valid index.
    pub fn clamp_pick_selection(&mut self) {
        let count = self.filtered_countries().len();
        if self.picker.index >= count {
            self.picker.index = count.saturating_sub(1);
        }
    }
}
