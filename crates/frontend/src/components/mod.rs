mod auth_card;
mod form_field;
mod submission_alert;

pub use auth_card::AuthCard;
pub use form_field::{FormField, bound_field};
pub use submission_alert::SubmissionAlert;
