use std::fmt::Write;

use chrono::Datelike;
use unsegen::base::*;
use unsegen::widget::*;

use super::Context;
use crate::grid::{self, Week};
use crate::provider::{holidays_on, Holiday};

/// The month grid: weekday header, one day-number row per week and, below
/// each, as many overlay rows as the busiest cell of that week needs to
/// list its holiday names.
pub struct MonthPane<'a> {
    context: &'a Context,
}

impl<'a> MonthPane<'a> {
    pub const COLUMNS: usize = 7;
    pub const CELL_WIDTH: usize = 13;

    const HEADER: &'static [&'static str] = &["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    pub fn new(context: &'a Context) -> Self {
        MonthPane { context }
    }

    fn overlay_names<'h>(week: &Week, holidays: &'h [Holiday]) -> Vec<Vec<&'h str>> {
        week.cells()
            .iter()
            .map(|cell| match cell.date() {
                Some(day) => holidays_on(day, holidays)
                    .into_iter()
                    .map(|holiday| holiday.name.as_str())
                    .collect(),
                None => Vec::new(),
            })
            .collect()
    }

    fn truncated(name: &str) -> String {
        name.chars().take(Self::CELL_WIDTH - 1).collect()
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::COLUMNS * Self::CELL_WIDTH),
            height: RowDemand::at_least(7),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let today = self.context.today();
        let holidays = self.context.holidays();

        let mut cursor = Cursor::new(&mut window);

        cursor.set_style_modifier(theme.header_style);
        for &head in Self::HEADER {
            write!(
                &mut cursor,
                "{:>width$}",
                head,
                width = Self::CELL_WIDTH
            )
            .unwrap();
        }
        writeln!(&mut cursor).unwrap();

        for week in grid::month_weeks(self.context.view().reference()) {
            for cell in week.cells() {
                match cell.date() {
                    Some(day) => {
                        let style = if day == today {
                            theme.today_style
                        } else {
                            theme.day_style
                        };
                        cursor.set_style_modifier(style);
                        write!(
                            &mut cursor,
                            "{:>width$}",
                            day.day(),
                            width = Self::CELL_WIDTH
                        )
                        .unwrap();
                    }
                    None => {
                        cursor.set_style_modifier(theme.empty_style);
                        write!(
                            &mut cursor,
                            "{:>width$}",
                            '·',
                            width = Self::CELL_WIDTH
                        )
                        .unwrap();
                    }
                }
            }
            writeln!(&mut cursor).unwrap();

            let names = Self::overlay_names(&week, holidays);
            let depth = names.iter().map(Vec::len).max().unwrap_or(0);

            cursor.set_style_modifier(theme.holiday_style);
            for row in 0..depth {
                for cell_names in &names {
                    let text = cell_names
                        .get(row)
                        .map(|name| Self::truncated(name))
                        .unwrap_or_default();
                    write!(
                        &mut cursor,
                        " {:<width$}",
                        text,
                        width = Self::CELL_WIDTH - 1
                    )
                    .unwrap();
                }
                writeln!(&mut cursor).unwrap();
            }
        }
    }
}
