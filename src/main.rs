//! FinanceSpace: desktop research client
//!
//! A themed research UI over the FinanceSpace backend: natural-language
//! queries dispatched to AI, web-search, or combined endpoints, a rolling
//! history of past queries, and a filterable news feed.
//!
//! The backend base URL comes from FINANCESPACE_BACKEND_URL, defaulting to
//! a local development server.

mod app;
mod backend;
mod history;
mod news;
mod query;
mod theme;

use std::env;

use app::FinanceSpace;
use iced::{window, Size};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

fn main() -> iced::Result {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let base_url =
        env::var("FINANCESPACE_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
    tracing::info!("Starting FinanceSpace against {}", base_url);

    iced::application(FinanceSpace::title, FinanceSpace::update, FinanceSpace::view)
        .theme(FinanceSpace::theme)
        .window(window::Settings {
            size: Size::new(1180.0, 860.0),
            position: window::Position::Centered,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || FinanceSpace::new(base_url))
}
