//! Post-authentication redirect target

use crate::config::PortalConfig;

/// Value of the `name` query parameter, decoded once.
///
/// An empty value counts as absent.
pub fn redirect_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Where to send the browser after a successful submission.
///
/// The parameter is URI-component decoded a second time on top of the query
/// decoding; when that second pass fails the once-decoded value is used.
pub fn resolve_redirect(query: &str, config: &PortalConfig) -> String {
    match redirect_param(query, &config.redirect_param) {
        Some(raw) => match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(err) => {
                tracing::warn!(error = %err, "Redirect target is not valid UTF-8 after decoding");
                raw
            }
        },
        None => config.default_redirect_url.clone(),
    }
}
