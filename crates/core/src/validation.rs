//! Field validators and the cross-field password rule
//!
//! Validators are plain functions from a raw value to an optional
//! [`ValidationError`]. They never touch form state; the form model
//! collects their results into an [`ErrorSet`] per field.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Active errors on one field, iterated in display priority order
pub type ErrorSet = BTreeSet<ValidationError>;

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

// Length and alphabet only; the digit requirement is checked separately
// because the regex engine has no lookahead.
static PASSWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9!@#$%^&*]{6,100}$").expect("password pattern is a valid regex")
});

/// Fails when the value is empty after trimming
pub fn required(value: &str) -> Option<ValidationError> {
    value.trim().is_empty().then_some(ValidationError::Required)
}

/// Fails when a non-empty value is not shaped like an email address.
///
/// Empty input passes so that only `Required` is reported for it.
pub fn email_format(value: &str) -> Option<ValidationError> {
    if value.is_empty() {
        return None;
    }

    let local_len = value.split('@').next().map_or(0, str::len);
    let valid = value.len() <= EMAIL_MAX_LEN
        && local_len <= EMAIL_LOCAL_MAX_LEN
        && EMAIL_PATTERN.is_match(value);

    (!valid).then_some(ValidationError::EmailFormat)
}

/// Fails unless the value is 6-100 characters from `[a-zA-Z0-9!@#$%^&*]`
/// with at least one digit. Every failure yields the same error.
pub fn password_strength(value: &str) -> Option<ValidationError> {
    let strong = PASSWORD_PATTERN.is_match(value) && value.bytes().any(|b| b.is_ascii_digit());
    (!strong).then_some(ValidationError::WeakPassword)
}

/// Outcome of the cross-field password comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordMatch {
    /// Error reported at form level, if any
    pub form_error: Option<ValidationError>,
    /// Error set the password field ends up with
    pub password_errors: ErrorSet,
}

/// Compare `password` against `confirm` and compute the password field's
/// resulting error set.
///
/// On mismatch the field's own errors are replaced by `MatchPassword` alone.
/// On match the existing errors are returned untouched.
pub fn password_match(password: &str, confirm: &str, existing: &ErrorSet) -> PasswordMatch {
    if password == confirm {
        PasswordMatch {
            form_error: None,
            password_errors: existing.clone(),
        }
    } else {
        PasswordMatch {
            form_error: Some(ValidationError::MatchPassword),
            password_errors: ErrorSet::from([ValidationError::MatchPassword]),
        }
    }
}
