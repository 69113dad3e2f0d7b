pub mod app;
pub mod context;
pub mod month_window;
pub mod picker;

pub use app::App;
pub use context::{Context, Mode, Theme};
pub use month_window::MonthPane;
pub use picker::PickerWindow;

use std::fmt::Write as _;

use unsegen::base::style::StyleModifier;
use unsegen::base::{Cursor, Window};
use unsegen::widget::{ColDemand, Demand2D, RenderingHints, RowDemand, Widget};

/// A single owned line of styled text, used for the controls and hint bars.
pub struct StatusLine {
    text: String,
    style: StyleModifier,
}

impl StatusLine {
    pub fn new(text: String, style: StyleModifier) -> Self {
        StatusLine { text, style }
    }

    // Width in terminal cells, not bytes; labels are not ASCII-only.
    fn display_width(text: &str) -> usize {
        text.chars().count()
    }
}

impl Widget for StatusLine {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(Self::display_width(&self.text)),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window).style_modifier(self.style);
        let _ = write!(&mut cursor, "{}", self.text);
    }
}
