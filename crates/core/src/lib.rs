//! Portal core: sign-in/sign-up form model and submission flow
//!
//! Everything in this crate is target independent. Browser specifics
//! (navigation, HTTP transport) come in through the [`AuthApi`] and
//! [`Navigator`] traits.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod messages;
pub mod observe;
pub mod redirect;
pub mod submission;
pub mod validation;

pub use api::{AuthApi, Credentials, Navigator, UserMetadata};
pub use config::PortalConfig;
pub use error::{ApiError, ConfigError, SubmissionError, ValidationError};
pub use form::{FieldName, FieldState, FormKind, FormModel, FormSnapshot};
pub use observe::{Observers, Subscription};
pub use redirect::{redirect_param, resolve_redirect};
pub use submission::{SubmissionController, SubmitOutcome, SubmitState};
pub use validation::ErrorSet;
