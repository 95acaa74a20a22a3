//! Browser location access

use portal_core::Navigator;
use wasm_bindgen::JsValue;

/// [`Navigator`] backed by `window.location`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn query(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            tracing::error!(url, "No window to navigate");
            return;
        };
        if let Err(err) = window.location().set_href(url) {
            tracing::error!(url, error = %describe(&err), "Navigation failed");
        }
    }
}

/// Origin of the current page, e.g. `https://portal.example.com`
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
