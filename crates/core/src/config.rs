//! Portal configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Runtime configuration shared by the client and the frontend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Prefix for API calls; empty means relative to the page origin
    pub api_base_url: String,
    /// Where to send the browser after success when no redirect was requested
    pub default_redirect_url: String,
    pub sign_in_path: String,
    pub sign_up_path: String,
    pub session_path: String,
    /// Query parameter carrying the post-authentication target
    pub redirect_param: String,
}

impl PortalConfig {
    pub const DEFAULT_REDIRECT_URL: &'static str = "https://beta.ngx-workshop.io/";
    pub const SIGN_IN_PATH: &'static str = "/api/sign-in";
    pub const SIGN_UP_PATH: &'static str = "/api/sign-up";
    pub const SESSION_PATH: &'static str = "/api/authentication/is-user-logged-in";
    pub const REDIRECT_PARAM: &'static str = "redirect";

    /// Parse a JSON document, filling missing keys with defaults
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply optional overrides on top of the defaults
    pub fn with_overrides(
        api_base_url: Option<&str>,
        default_redirect_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base) = api_base_url {
            config.api_base_url = base.to_string();
        }
        if let Some(target) = default_redirect_url {
            config.default_redirect_url = target.to_string();
        }
        config.validate()?;
        Ok(config)
    }

    /// The fallback target must be absolute; the API base may be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.default_redirect_url).map_err(|source| ConfigError::Url {
            field: "default_redirect_url",
            source,
        })?;
        if !self.api_base_url.is_empty() {
            url::Url::parse(&self.api_base_url).map_err(|source| ConfigError::Url {
                field: "api_base_url",
                source,
            })?;
        }
        Ok(())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            default_redirect_url: Self::DEFAULT_REDIRECT_URL.to_string(),
            sign_in_path: Self::SIGN_IN_PATH.to_string(),
            sign_up_path: Self::SIGN_UP_PATH.to_string(),
            session_path: Self::SESSION_PATH.to_string(),
            redirect_param: Self::REDIRECT_PARAM.to_string(),
        }
    }
}
