//! Projection of active error kinds to display text

use crate::form::FieldName;
use crate::validation::ErrorSet;
use std::collections::BTreeMap;

/// Message shown for a field: the highest priority error's text, or an
/// empty string when the field is clean.
pub fn display_message(errors: &ErrorSet) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Build the per-field message map. Every field gets an entry, so a cleared
/// error replaces the previous text instead of leaving it behind.
pub fn project<'a>(
    fields: impl IntoIterator<Item = (FieldName, &'a ErrorSet)>,
) -> BTreeMap<FieldName, String> {
    fields
        .into_iter()
        .map(|(name, errors)| (name, display_message(errors)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_required_wins_over_strength() {
        let errors = ErrorSet::from([ValidationError::WeakPassword, ValidationError::Required]);
        assert_eq!(display_message(&errors), "Required");
    }

    #[test]
    fn test_clean_field_projects_to_empty_string() {
        let clean = ErrorSet::new();
        let weak = ErrorSet::from([ValidationError::WeakPassword]);
        let map = project([(FieldName::Email, &clean), (FieldName::Password, &weak)]);

        assert_eq!(map.get(&FieldName::Email).map(String::as_str), Some(""));
        assert_eq!(
            map.get(&FieldName::Password).map(String::as_str),
            Some("Password too weak")
        );
    }
}
