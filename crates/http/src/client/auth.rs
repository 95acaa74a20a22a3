//! Authentication API client methods

use super::{AuthClient, ClientError};
use async_trait::async_trait;
use portal_core::{ApiError, AuthApi, Credentials, UserMetadata};
use reqwest::Method;

impl AuthClient {
    /// Sign in with email and password
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<UserMetadata, ClientError> {
        let req = self
            .request(Method::POST, &self.endpoints.sign_in)
            .json(credentials);
        self.execute_lenient(req).await
    }

    /// Create an account
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<UserMetadata, ClientError> {
        let req = self
            .request(Method::POST, &self.endpoints.sign_up)
            .json(credentials);
        self.execute_lenient(req).await
    }

    /// Check whether the browser session is authenticated
    pub async fn is_user_logged_in(&self) -> Result<bool, ClientError> {
        let req = self.request(Method::GET, &self.endpoints.session);
        self.execute(req).await
    }
}

#[async_trait(?Send)]
impl AuthApi for AuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError> {
        Ok(Self::sign_in(self, credentials).await?)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<UserMetadata, ApiError> {
        Ok(Self::sign_up(self, credentials).await?)
    }

    async fn is_user_logged_in(&self) -> Result<bool, ApiError> {
        Ok(Self::is_user_logged_in(self).await?)
    }
}
