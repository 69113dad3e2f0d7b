use std::sync::mpsc;
use std::sync::Arc;

use chrono::{Datelike, Month};
use num_traits::FromPrimitive;

use unsegen::base::Terminal;
use unsegen::input::{EditBehavior, Event as InputEvent, Input, Key, ScrollBehavior};
use unsegen::widget::*;

use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::fetch;
use crate::provider::RestClient;
use crate::view::{ViewMode, ViewState};

use super::picker::{PickBehaviour, PickerSelection};
use super::{Context, Mode, MonthPane, PickerWindow, StatusLine};

pub struct App {
    client: Arc<RestClient>,
    context: Context,
    quit: bool,
}

impl App {
    pub fn new(config: &Config, start_country: Option<String>) -> App {
        let mut view = ViewState::today();
        view.set_location(start_country.or_else(|| config.default_country.clone()));

        App {
            client: Arc::new(RestClient::from_config(config)),
            context: Context::new(view),
            quit: false,
        }
    }

    fn title_bar(&self) -> StatusLine {
        let view = self.context.view();
        let month = Month::from_u32(view.reference().month())
            .map(|month| month.name())
            .unwrap_or("?");
        let country = self
            .context
            .country_label()
            .unwrap_or("no country selected");
        let mode = match view.mode() {
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        };

        StatusLine::new(
            format!(
                " {} {}  |  {}  |  view: {}",
                month,
                view.selected_year(),
                country,
                mode
            ),
            self.context.theme().title_style,
        )
    }

    fn hint_bar(&self) -> StatusLine {
        StatusLine::new(
            " q quit  h/l prev/next  t today  m/y view  [/] year  c country  T theme".to_owned(),
            self.context.theme().bar_style,
        )
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        let mut layout = VLayout::new()
            .widget(self.title_bar())
            .widget(MonthPane::new(&self.context));

        if let Mode::Pick = self.context.mode {
            layout = layout
                .widget(self.context.picker().search.as_widget())
                .widget(PickerWindow::new(&self.context));
        } else {
            layout = layout.widget(self.hint_bar());
        }

        layout
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.close_picker();
            return;
        }

        match self.context.mode {
            Mode::Normal => self.handle_normal_key(input),
            Mode::Pick => {
                input
                    .chain(PickBehaviour(&mut self.context))
                    .chain(
                        ScrollBehavior::new(&mut PickerSelection(&mut self.context))
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(
                        EditBehavior::new(self.context.picker_line_mut())
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .finish();
                self.context.clamp_pick_selection();
            }
        }
    }

    fn handle_normal_key(&mut self, input: Input) {
        match input.event {
            InputEvent::Key(Key::Char('q')) => self.quit = true,
            InputEvent::Key(Key::Char('h')) | InputEvent::Key(Key::Left) => {
                self.context.view_mut().prev()
            }
            InputEvent::Key(Key::Char('l')) | InputEvent::Key(Key::Right) => {
                self.context.view_mut().next()
            }
            InputEvent::Key(Key::Char('t')) => self.context.view_mut().go_to_today(),
            InputEvent::Key(Key::Char('m')) => self.context.view_mut().set_mode(ViewMode::Month),
            InputEvent::Key(Key::Char('y')) => self.context.view_mut().set_mode(ViewMode::Year),
            InputEvent::Key(Key::Char('[')) => {
                let year = self.context.view().selected_year();
                self.context.view_mut().set_year(year - 1);
            }
            InputEvent::Key(Key::Char(']')) => {
                let year = self.context.view().selected_year();
                self.context.view_mut().set_year(year + 1);
            }
            InputEvent::Key(Key::Char('c')) => self.context.open_picker(),
            InputEvent::Key(Key::Char('T')) => self.context.toggle_theme(),
            _ => {}
        }
    }

    fn maybe_refetch(&mut self, sink: &mpsc::Sender<Event>) {
        if let Some(target) = self.context.pending_holiday_request() {
            let token = self.context.begin_holiday_request(target.clone());
            fetch::spawn_holidays(
                self.client.clone(),
                sink.clone(),
                token,
                target.0,
                target.1,
            );
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        fetch::spawn_countries(self.client.clone(), dispatcher.event_sink().clone());
        self.maybe_refetch(dispatcher.event_sink());

        while !self.quit {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next() {
                Ok(Event::Update) => self.context.update(),
                Ok(Event::Input(input)) => self.handle_input(input),
                Ok(Event::Countries(countries)) => self.context.apply_countries(countries),
                Ok(Event::Holidays { token, holidays }) => {
                    self.context.apply_holidays(token, holidays)
                }
                Err(_) => break,
            }

            self.maybe_refetch(dispatcher.event_sink());
        }

        Ok(())
    }
}
