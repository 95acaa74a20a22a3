//! Frontend configuration

use once_cell::sync::Lazy;
use portal_core::PortalConfig;

static PORTAL_CONFIG: Lazy<PortalConfig> = Lazy::new(|| {
    PortalConfig::with_overrides(
        option_env!("PORTAL_API_BASE_URL"),
        option_env!("PORTAL_DEFAULT_REDIRECT_URL"),
    )
    .unwrap_or_else(|err| {
        tracing::error!(error = %err, "Invalid build-time configuration, using defaults");
        PortalConfig::default()
    })
});

/// Portal configuration, with build-time overrides from
/// `PORTAL_API_BASE_URL` and `PORTAL_DEFAULT_REDIRECT_URL`.
///
/// Resolved once per page load.
pub fn portal_config() -> &'static PortalConfig {
    &PORTAL_CONFIG
}
