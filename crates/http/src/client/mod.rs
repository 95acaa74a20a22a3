//! Portal authentication client

pub mod auth;
pub mod error;

use error::ClientError;
use portal_core::PortalConfig;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "portal-client/0.1.0";

/// Paths of the three authentication endpoints
#[derive(Clone, Debug, PartialEq, Eq)]
struct Endpoints {
    sign_in: String,
    sign_up: String,
    session: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sign_in: PortalConfig::SIGN_IN_PATH.to_string(),
            sign_up: PortalConfig::SIGN_UP_PATH.to_string(),
            session: PortalConfig::SESSION_PATH.to_string(),
        }
    }
}

/// Client for the public authentication endpoints.
///
/// Session state lives in cookies managed by the browser, so requests carry
/// no credentials of their own.
#[derive(Clone, Debug)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    endpoints: Endpoints,
}

impl AuthClient {
    /// Create a new client with default endpoints
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from the portal configuration.
    ///
    /// `origin` is used when the configuration leaves the API base empty.
    pub fn from_config(config: &PortalConfig, origin: &str) -> Result<Self, ClientError> {
        let base_url = if config.api_base_url.is_empty() {
            origin
        } else {
            config.api_base_url.as_str()
        };
        Self::builder().base_url(base_url).endpoints(config).build()
    }

    /// Create a new client builder
    pub fn builder() -> AuthClientBuilder {
        AuthClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for `path`
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute a request whose success body is informational only.
    ///
    /// Any 2xx counts as success; a body that fails to decode as `T` is
    /// logged and replaced by `T::default()`.
    pub async fn execute_lenient<T: DeserializeOwned + Default>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        let body = response.text().await?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(error = %err, "Unexpected response body, continuing with defaults");
                Ok(T::default())
            }
        }
    }

    /// Send `request`, turning a non-2xx status into an error.
    ///
    /// Failure bodies are left unread; only the status matters to callers.
    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_status(status, status.to_string()))
        }
    }
}

/// Builder for [`AuthClient`]
#[derive(Default)]
pub struct AuthClientBuilder {
    base_url: Option<String>,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AuthClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Take endpoint paths from the portal configuration
    pub fn endpoints(mut self, config: &PortalConfig) -> Self {
        self.endpoints = Endpoints {
            sign_in: config.sign_in_path.clone(),
            sign_up: config.sign_up_path.clone(),
            session: config.session_path.clone(),
        };
        self
    }

    /// Set the request timeout (ignored on wasm)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AuthClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout;

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        );

        let client = client_builder.build()?;

        Ok(AuthClient {
            client,
            base_url,
            endpoints: self.endpoints,
        })
    }
}
