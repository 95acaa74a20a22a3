//! Routed pages

mod sign_in;
mod sign_up;

pub use sign_in::SignInPage;
pub use sign_up::SignUpPage;

use crate::app::Route;
use crate::browser::BrowserNavigator;
use crate::config::portal_config;
use portal_core::{Navigator as _, redirect_param};
use std::collections::BTreeMap;
use yew::prelude::*;
use yew_router::prelude::*;

/// Link between the portal pages that keeps the redirect target
pub type PageLink = Link<Route, BTreeMap<String, String>>;

/// Redirect parameter of the current page, ready to carry onto another route
pub fn carried_query() -> Option<BTreeMap<String, String>> {
    let config = portal_config();
    redirect_param(&BrowserNavigator.query(), &config.redirect_param)
        .map(|target| BTreeMap::from([(config.redirect_param.clone(), target)]))
}

/// Sends unknown paths to the sign-in page
#[function_component(RedirectToLogin)]
pub fn redirect_to_login() -> Html {
    let navigator = use_navigator();

    use_effect_with((), move |_| {
        let Some(navigator) = navigator else {
            tracing::error!("RedirectToLogin rendered outside a router");
            return;
        };
        let result = match carried_query() {
            Some(query) => navigator.replace_with_query(&Route::Login, &query),
            None => {
                navigator.replace(&Route::Login);
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::error!(error = ?err, "Failed to redirect to sign-in");
        }
    });

    html! {}
}
