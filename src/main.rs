//! Motivation Widget - an always-on-top sticky note for the desktop
//!
//! Entry point for the application. Handles logging initialization, loads
//! the persisted state and bootstraps the application window.

mod app;
mod config;
mod editor;
mod error;
mod fonts;
mod message;
mod model;
mod state;
mod store;
mod ui;

// Keyboard shortcuts
mod menu;

use app::{Flags, MotivationWidget};
use config::{APP_NAME, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use store::StateStore;

fn main() -> cosmic::iced::Result {
    // Initialize logging
    init_logging();

    log::info!("Starting {}", APP_NAME);

    let store = StateStore::default();
    log::debug!("State file: {}", store.path().display());
    let state = store.load_state();

    // Note: Don't use .size() with cosmic apps - it can cause Wayland protocol errors
    // The saved geometry is applied to the window once it exists
    cosmic::app::run::<MotivationWidget>(
        cosmic::app::Settings::default()
            .size_limits(
                cosmic::iced::Limits::NONE
                    .min_width(MIN_WIDTH as f32)
                    .min_height(MIN_HEIGHT as f32)
                    .max_width(MAX_WIDTH as f32)
                    .max_height(MAX_HEIGHT as f32),
            )
            .transparent(true),
        Flags { store, state },
    )
}

/// Initialize the logging system
fn init_logging() {
    // Set default log level if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,motivation_widget=debug");
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}
