//! Background fetch workers. Each request runs on its own detached thread;
//! a successful response is posted into the event channel, a failure is
//! logged and leaves the previously fetched data in place.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::events::Event;
use crate::provider::RestClient;

pub fn spawn_countries(client: Arc<RestClient>, sink: mpsc::Sender<Event>) {
    thread::spawn(move || match client.countries() {
        Ok(countries) => {
            log::debug!("fetched {} countries", countries.len());
            let _ = sink.send(Event::Countries(countries));
        }
        Err(err) => log::warn!("country list fetch failed: {}", err),
    });
}

pub fn spawn_holidays(
    client: Arc<RestClient>,
    sink: mpsc::Sender<Event>,
    token: u64,
    country: String,
    year: i32,
) {
    thread::spawn(move || match client.holidays(&country, year) {
        Ok(holidays) => {
            log::debug!(
                "fetched {} holidays for {} in {}",
                holidays.len(),
                country,
                year
            );
            let _ = sink.send(Event::Holidays { token, holidays });
        }
        Err(err) => log::warn!("holiday fetch for {}/{} failed: {}", country, year, err),
    });
}
