pub mod api;
pub mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod hooks;
pub mod logging;
pub mod pages;

pub use app::{App, Route};
pub use browser::BrowserNavigator;
pub use config::portal_config;
