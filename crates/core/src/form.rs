//! Form model for the sign-in and sign-up forms
//!
//! [`validate`] is a pure function from raw field values to a
//! [`FormSnapshot`]. [`FormModel`] holds the current snapshot and
//! re-runs validation over the whole form on every edit, so a change to
//! `password` alone can fix or break the password match.

use crate::api::Credentials;
use crate::messages;
use crate::observe::{Observers, Subscription};
use crate::validation::{self, ErrorSet};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Editable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Email,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// Name used in markup and logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which form is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    SignIn,
    SignUp,
}

impl FormKind {
    pub const fn fields(self) -> &'static [FieldName] {
        match self {
            Self::SignIn => &[FieldName::Email, FieldName::Password],
            Self::SignUp => &[
                FieldName::Email,
                FieldName::Password,
                FieldName::ConfirmPassword,
            ],
        }
    }

    pub fn has_field(self, field: FieldName) -> bool {
        self.fields().contains(&field)
    }

    /// Run the field-level validators attached to `field`
    fn field_errors(self, field: FieldName, value: &str) -> ErrorSet {
        let checks = match (self, field) {
            (Self::SignUp, FieldName::Email) => {
                vec![validation::required(value), validation::email_format(value)]
            }
            (Self::SignUp, FieldName::Password) => {
                vec![
                    validation::required(value),
                    validation::password_strength(value),
                ]
            }
            _ => vec![validation::required(value)],
        };
        checks.into_iter().flatten().collect()
    }
}

/// State of one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub raw_value: String,
    pub touched: bool,
    pub errors: ErrorSet,
}

/// Immutable view of the whole form after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub kind: FormKind,
    pub fields: BTreeMap<FieldName, FieldState>,
    /// Errors that need more than one field to compute
    pub form_errors: ErrorSet,
    /// One message per field; empty when the field is clean
    pub display_errors: BTreeMap<FieldName, String>,
}

impl FormSnapshot {
    pub fn is_valid(&self) -> bool {
        self.form_errors.is_empty() && self.fields.values().all(|field| field.errors.is_empty())
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.fields
            .get(&field)
            .map_or("", |state| state.raw_value.as_str())
    }

    pub fn errors(&self, field: FieldName) -> Option<&ErrorSet> {
        self.fields.get(&field).map(|state| &state.errors)
    }

    pub fn display_error(&self, field: FieldName) -> &str {
        self.display_errors.get(&field).map_or("", String::as_str)
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.fields.get(&field).is_some_and(|state| state.touched)
    }

    /// Raw email and password; the confirmation never leaves the form
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.value(FieldName::Email).to_string(),
            password: self.value(FieldName::Password).to_string(),
        }
    }
}

/// Validate `fields` for `kind`.
///
/// Field validators run first; for sign-up the password match rule then
/// decides the password field's final error set.
pub fn validate(kind: FormKind, fields: &BTreeMap<FieldName, FieldState>) -> FormSnapshot {
    let mut validated: BTreeMap<FieldName, FieldState> = kind
        .fields()
        .iter()
        .map(|&name| {
            let current = fields.get(&name).cloned().unwrap_or_default();
            let errors = kind.field_errors(name, &current.raw_value);
            (name, FieldState { errors, ..current })
        })
        .collect();

    let mut form_errors = ErrorSet::new();
    if kind == FormKind::SignUp {
        let password = validated
            .get(&FieldName::Password)
            .cloned()
            .unwrap_or_default();
        let confirm = validated
            .get(&FieldName::ConfirmPassword)
            .map_or("", |state| state.raw_value.as_str());

        let outcome = validation::password_match(&password.raw_value, confirm, &password.errors);
        form_errors.extend(outcome.form_error);
        if let Some(state) = validated.get_mut(&FieldName::Password) {
            state.errors = outcome.password_errors;
        }
    }

    let display_errors =
        messages::project(validated.iter().map(|(&name, state)| (name, &state.errors)));

    FormSnapshot {
        kind,
        fields: validated,
        form_errors,
        display_errors,
    }
}

/// Observable holder of the current form snapshot
#[derive(Debug)]
pub struct FormModel {
    current: RefCell<Rc<FormSnapshot>>,
    observers: Observers<Rc<FormSnapshot>>,
}

impl FormModel {
    /// Create the form with every field empty and validated
    pub fn new(kind: FormKind) -> Self {
        let snapshot = validate(kind, &BTreeMap::new());
        Self {
            current: RefCell::new(Rc::new(snapshot)),
            observers: Observers::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.current.borrow().kind
    }

    pub fn snapshot(&self) -> Rc<FormSnapshot> {
        Rc::clone(&self.current.borrow())
    }

    /// Receive every snapshot produced after this call
    pub fn subscribe(&self, callback: impl Fn(&Rc<FormSnapshot>) + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    /// Replace a field's raw value and re-validate the whole form
    pub fn set_value(&self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        self.update(field, move |state| state.raw_value = value);
    }

    pub fn mark_touched(&self, field: FieldName) {
        self.update(field, |state| state.touched = true);
    }

    /// Re-run validation without changing any value
    pub fn revalidate(&self) {
        let snapshot = self.snapshot();
        self.publish(validate(snapshot.kind, &snapshot.fields));
    }

    fn update(&self, field: FieldName, edit: impl FnOnce(&mut FieldState)) {
        let snapshot = self.snapshot();
        if !snapshot.kind.has_field(field) {
            tracing::warn!(field = %field, kind = ?snapshot.kind, "Ignoring edit to unknown field");
            return;
        }

        let mut fields = snapshot.fields.clone();
        edit(fields.entry(field).or_default());
        self.publish(validate(snapshot.kind, &fields));
    }

    fn publish(&self, snapshot: FormSnapshot) {
        tracing::debug!(
            kind = ?snapshot.kind,
            valid = snapshot.is_valid(),
            "Form re-validated"
        );
        let snapshot = Rc::new(snapshot);
        *self.current.borrow_mut() = Rc::clone(&snapshot);
        self.observers.emit(&snapshot);
    }
}
