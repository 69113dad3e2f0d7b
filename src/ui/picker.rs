use std::fmt::Write;

use unsegen::base::*;
use unsegen::input::{Behavior, Event, Input, Key, OperationResult, Scrollable};
use unsegen::widget::*;

use super::Context;

/// The country picker result list. The search line above it is drawn as its
/// own widget (the picker's `PromptLine`); this window renders the options
/// matching the current search text with the selection highlighted.
pub struct PickerWindow<'a> {
    context: &'a Context,
}

impl<'a> PickerWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        PickerWindow { context }
    }
}

impl Widget for PickerWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(30),
            height: RowDemand::at_least(5),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = self.context.theme();
        let filtered = self.context.filtered_countries();
        // The selection is clamped on every mutation, but the search text
        // may have narrowed the list since; stay inside it regardless.
        let selected = self
            .context
            .picker()
            .index
            .min(filtered.len().saturating_sub(1));

        let rows = window.get_height().raw_value() as usize;

        // Keep the selection visible when the list outgrows the window.
        let first = selected.saturating_sub(rows.saturating_sub(1));

        let mut cursor = Cursor::new(&mut window);

        if filtered.is_empty() {
            cursor.set_style_modifier(theme.empty_style);
            let _ = write!(&mut cursor, "no matching country");
            return;
        }

        for (idx, country) in filtered.iter().enumerate().skip(first).take(rows) {
            let saved_style = cursor.get_style_modifier();

            if idx == selected {
                cursor.apply_style_modifier(theme.selection_style);
            }

            if let Err(err) = writeln!(&mut cursor, "{} ({})", country.label, country.value) {
                log::warn!("Error while writing country option: {}", err);
            }

            cursor.set_style_modifier(saved_style);
        }
    }
}

/// Confirms the picker selection on enter.
pub struct PickBehaviour<'a>(pub &'a mut Context);

impl Behavior for PickBehaviour<'_> {
    fn input(self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            self.0.confirm_pick();
            None
        } else {
            Some(input)
        }
    }
}

/// Moves the picker selection through the filtered list.
pub struct PickerSelection<'a>(pub &'a mut Context);

impl Scrollable for PickerSelection<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        if self.0.move_pick_selection(false) {
            Ok(())
        } else {
            Err(())
        }
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        if self.0.move_pick_selection(true) {
            Ok(())
        } else {
            Err(())
        }
    }
}
