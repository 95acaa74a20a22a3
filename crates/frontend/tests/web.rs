//! Browser tests, run with `wasm-pack test --headless --firefox crates/frontend`

#![cfg(target_arch = "wasm32")]

use portal_core::{ApiError, AuthApi, Credentials, Navigator, PortalConfig};
use portal_frontend::api::PortalApi;
use portal_frontend::{BrowserNavigator, portal_config};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_portal_config_defaults() {
    let config = portal_config();
    assert!(config.validate().is_ok());
    assert_eq!(config.redirect_param, PortalConfig::REDIRECT_PARAM);
}

#[wasm_bindgen_test]
fn test_portal_config_is_resolved_once() {
    assert!(std::ptr::eq(portal_config(), portal_config()));
}

#[wasm_bindgen_test]
fn test_browser_query_matches_location() {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    assert_eq!(BrowserNavigator.query(), search);
}

#[wasm_bindgen_test]
fn test_connect_uses_page_origin() {
    assert!(matches!(
        PortalApi::connect(&PortalConfig::default()),
        PortalApi::Ready(_)
    ));
}

#[wasm_bindgen_test]
async fn test_unavailable_api_reports_transport_error() {
    let api = PortalApi::Unavailable("base_url is empty".into());
    let credentials = Credentials {
        email: "a@b.com".into(),
        password: "abc123".into(),
    };

    let err = api.sign_up(&credentials).await.unwrap_err();
    assert_eq!(err, ApiError::Transport("base_url is empty".into()));
    assert_eq!(err.status(), 0);
}
