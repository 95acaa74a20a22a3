//! Seams to the outside world: the authentication endpoint and the browser

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for sign-in and sign-up
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body of the sign-in and sign-up endpoints
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Remote authentication API
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST` the credentials to the sign-in endpoint
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError>;

    /// `POST` the credentials to the sign-up endpoint
    async fn sign_up(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError>;

    /// Ask whether the current session is already authenticated
    async fn is_user_logged_in(&self) -> Result<bool, ApiError>;
}

/// Access to the current page location
pub trait Navigator {
    /// Query string of the current page, with or without the leading `?`
    fn query(&self) -> String;

    /// Replace the current page with `url` (full navigation)
    fn navigate(&self, url: &str);
}
