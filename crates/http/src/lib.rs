//! Portal HTTP client
//!
//! Talks to the authentication endpoints and implements
//! [`portal_core::AuthApi`] on top of them.

pub mod client;

pub use client::error::ClientError;
pub use client::{AuthClient, AuthClientBuilder};
