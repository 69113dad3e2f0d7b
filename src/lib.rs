pub mod config;
pub mod events;
pub mod fetch;
pub mod grid;
pub mod provider;
pub mod ui;
pub mod view;
