//! Authentication API as seen by the pages

use crate::browser::page_origin;
use async_trait::async_trait;
use portal_core::{ApiError, AuthApi, Credentials, PortalConfig, UserMetadata};
use portal_http::AuthClient;

/// The HTTP client, or the reason it could not be built.
///
/// A misconfigured client fails every call with status 0 so the pages show
/// a submission error instead of crashing.
#[derive(Clone, Debug)]
pub enum PortalApi {
    Ready(AuthClient),
    Unavailable(String),
}

impl PortalApi {
    pub fn connect(config: &PortalConfig) -> Self {
        match AuthClient::from_config(config, &page_origin()) {
            Ok(client) => Self::Ready(client),
            Err(err) => {
                tracing::error!(error = %err, "Failed to build API client");
                Self::Unavailable(err.to_string())
            }
        }
    }

    fn client(&self) -> Result<&AuthClient, ApiError> {
        match self {
            Self::Ready(client) => Ok(client),
            Self::Unavailable(reason) => Err(ApiError::Transport(reason.clone())),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for PortalApi {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError> {
        AuthApi::sign_in(self.client()?, credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError> {
        AuthApi::sign_up(self.client()?, credentials).await
    }

    async fn is_user_logged_in(&self) -> Result<bool, ApiError> {
        AuthApi::is_user_logged_in(self.client()?).await
    }
}
