//! Live form state: value storage, rule execution and the submission flow.
//!
//! `FormState` is a cheap `Copy` handle over reactive signals. The form
//! component constructs one from the derivation output and passes it to
//! every control; controls write through the binding methods and read
//! reactively, so the handle owns all live mutation. None of it touches
//! the DOM, so the whole submission flow runs as plain function calls.

use leptos::prelude::*;
use std::collections::HashMap;

use super::schema::{validate_values, DerivedSchema, ValueRule};
use super::types::{FieldValue, FormValues};

/// Reactive state for one form instance.
///
/// Error slots fill lazily: a field gets an entry only once it has been
/// edited or blurred, or after a submit attempt validated the whole form.
#[derive(Clone, Copy)]
pub struct FormState {
    values: RwSignal<FormValues>,
    rules: RwSignal<HashMap<String, ValueRule>>,
    errors: RwSignal<HashMap<String, String>>,
    submitting: RwSignal<bool>,
}

impl FormState {
    /// Take ownership of the derived initial values and rules
    pub fn new(schema: &DerivedSchema) -> Self {
        Self {
            values: RwSignal::new(schema.initial_values.clone()),
            rules: RwSignal::new(schema.rules.clone()),
            errors: RwSignal::new(HashMap::new()),
            submitting: RwSignal::new(false),
        }
    }

    // ------------------------------------------------------------------
    // Reactive reads
    // ------------------------------------------------------------------

    /// Current string value of a single-valued field
    pub fn text(&self, name: &str) -> String {
        self.values.with(|values| {
            values
                .get(name)
                .and_then(FieldValue::as_single)
                .map(String::from)
                .unwrap_or_default()
        })
    }

    /// Current collection value of a multi-valued field
    pub fn selections(&self, name: &str) -> Vec<String> {
        self.values.with(|values| {
            values
                .get(name)
                .and_then(FieldValue::as_many)
                .map(<[String]>::to_vec)
                .unwrap_or_default()
        })
    }

    /// Whether the collection value of `name` contains `value`
    pub fn is_selected(&self, name: &str, value: &str) -> bool {
        self.values.with(|values| {
            values
                .get(name)
                .and_then(FieldValue::as_many)
                .map(|items| items.iter().any(|item| item == value))
                .unwrap_or(false)
        })
    }

    /// Current validation error of a field, if any
    pub fn error(&self, name: &str) -> Option<String> {
        self.errors.with(|errors| errors.get(name).cloned())
    }

    /// Whether a submission handler is currently running
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    // ------------------------------------------------------------------
    // Bindings (control change events write through these)
    // ------------------------------------------------------------------

    /// Replace the string value of a single-valued field
    pub fn set_text(&self, name: &str, value: String) {
        self.values.update(|values| {
            values.insert(name.to_string(), FieldValue::Single(value));
        });
        self.validate_field(name);
    }

    /// Replace the full collection value of a multi-valued field
    pub fn set_many(&self, name: &str, selected: Vec<String>) {
        self.values.update(|values| {
            values.insert(name.to_string(), FieldValue::Many(selected));
        });
        self.validate_field(name);
    }

    /// Add or remove one value from a collection field (checkbox toggle)
    pub fn set_member(&self, name: &str, value: &str, included: bool) {
        self.values.update(|values| {
            let entry = values
                .entry(name.to_string())
                .or_insert_with(FieldValue::empty_many);
            if let FieldValue::Many(items) = entry {
                if included {
                    if !items.iter().any(|item| item == value) {
                        items.push(value.to_string());
                    }
                } else {
                    items.retain(|item| item != value);
                }
            }
        });
        self.validate_field(name);
    }

    /// Re-validate on blur so errors surface when a field is left empty
    pub fn blur(&self, name: &str) {
        self.validate_field(name);
    }

    // ------------------------------------------------------------------
    // Validation and submission
    // ------------------------------------------------------------------

    fn validate_field(&self, name: &str) {
        let Some(rule) = self.rules.with_untracked(|rules| rules.get(name).cloned()) else {
            return;
        };
        let value = self
            .values
            .with_untracked(|values| values.get(name).cloned())
            .unwrap_or_else(FieldValue::empty_single);

        match rule.check(&value) {
            Ok(()) => self.errors.update(|errors| {
                errors.remove(name);
            }),
            Err(message) => self.errors.update(|errors| {
                errors.insert(name.to_string(), message);
            }),
        }
    }

    /// Run full validation; on success return a snapshot of the values.
    ///
    /// On failure every failing field's error slot is populated and `None`
    /// is returned, blocking submission. While a submission is in flight
    /// the form refuses further attempts.
    pub fn try_submit(&self) -> Option<FormValues> {
        if self.submitting.get_untracked() {
            return None;
        }

        let failures = self.rules.with_untracked(|rules| {
            self.values
                .with_untracked(|values| validate_values(rules, values))
        });

        if failures.is_empty() {
            self.errors.set(HashMap::new());
            Some(self.values.get_untracked())
        } else {
            self.errors.set(failures);
            None
        }
    }

    /// Raise the in-flight flag for the duration of the submission handler
    pub fn begin_submit(&self) {
        self.submitting.set(true);
    }

    /// Lower the in-flight flag once the handler completed
    pub fn finish_submit(&self) {
        self.submitting.set(false);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::dynamic_form::schema::derive_schema;
    use crate::components::dynamic_form::types::{FieldConfig, FieldOption};

    fn state_for(config: Vec<FieldConfig>) -> FormState {
        FormState::new(&derive_schema(&config))
    }

    fn checkbox_roles() -> FieldConfig {
        FieldConfig {
            name: "roles".to_string(),
            field_type: "checkbox".to_string(),
            required: true,
            options: Some(vec![
                FieldOption {
                    label: "Admin".to_string(),
                    value: "admin".to_string(),
                },
                FieldOption {
                    label: "User".to_string(),
                    value: "user".to_string(),
                },
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_pattern_field_submit_flow() {
        let state = state_for(vec![FieldConfig {
            name: "email".to_string(),
            field_type: "text".to_string(),
            required: true,
            regex: Some(r"^\S+@\S+$".to_string()),
            ..Default::default()
        }]);

        // untouched and empty: submission blocked with the required message
        assert!(state.try_submit().is_none());
        assert_eq!(state.error("email").as_deref(), Some("Required"));

        // non-matching value: the generic format message, still blocked
        state.set_text("email", "bad".to_string());
        assert_eq!(state.error("email").as_deref(), Some("Invalid format"));
        assert!(state.try_submit().is_none());

        // matching value: error clears and the snapshot is handed out
        state.set_text("email", "a@b.co".to_string());
        assert_eq!(state.error("email"), None);
        let values = state.try_submit().expect("valid form submits");
        assert_eq!(
            values.get("email"),
            Some(&FieldValue::Single("a@b.co".to_string()))
        );
    }

    #[test]
    fn test_required_checkbox_group_submit_flow() {
        let state = state_for(vec![checkbox_roles()]);

        assert!(state.try_submit().is_none());
        assert_eq!(
            state.error("roles").as_deref(),
            Some("At least one selection is required")
        );

        state.set_member("roles", "admin", true);
        assert_eq!(state.error("roles"), None);
        let values = state.try_submit().expect("one selection suffices");
        assert_eq!(
            values.get("roles"),
            Some(&FieldValue::Many(vec!["admin".to_string()]))
        );
    }

    #[test]
    fn test_member_toggle_appends_and_removes() {
        let state = state_for(vec![checkbox_roles()]);

        state.set_member("roles", "admin", true);
        state.set_member("roles", "user", true);
        assert_eq!(state.selections("roles"), vec!["admin", "user"]);
        assert!(state.is_selected("roles", "admin"));

        // toggling an already-present value on again does not duplicate it
        state.set_member("roles", "admin", true);
        assert_eq!(state.selections("roles").len(), 2);

        state.set_member("roles", "admin", false);
        assert_eq!(state.selections("roles"), vec!["user"]);
        assert!(!state.is_selected("roles", "admin"));
    }

    #[test]
    fn test_optional_select_submits_placeholder_value() {
        let state = state_for(vec![FieldConfig {
            name: "country".to_string(),
            field_type: "select".to_string(),
            required: false,
            multiple_select: Some(false),
            options: Some(vec![FieldOption {
                label: "US".to_string(),
                value: "us".to_string(),
            }]),
            ..Default::default()
        }]);

        // placeholder untouched: no error, the empty value is submitted
        let values = state.try_submit().expect("optional field never blocks");
        assert_eq!(state.error("country"), None);
        assert_eq!(
            values.get("country"),
            Some(&FieldValue::Single(String::new()))
        );
    }

    #[test]
    fn test_unknown_kind_never_blocks_submission() {
        let state = state_for(vec![FieldConfig {
            name: "when".to_string(),
            field_type: "datetime".to_string(),
            required: true,
            ..Default::default()
        }]);

        let values = state.try_submit().expect("unknown kinds are inert");
        assert!(values.is_empty());
    }

    #[test]
    fn test_blur_surfaces_required_error() {
        let state = state_for(vec![FieldConfig {
            name: "username".to_string(),
            field_type: "text".to_string(),
            required: true,
            ..Default::default()
        }]);

        assert_eq!(state.error("username"), None);
        state.blur("username");
        assert_eq!(state.error("username").as_deref(), Some("Required"));

        state.set_text("username", "ada".to_string());
        assert_eq!(state.error("username"), None);
    }

    #[test]
    fn test_in_flight_guard_blocks_resubmission() {
        let state = state_for(vec![FieldConfig {
            name: "nickname".to_string(),
            field_type: "text".to_string(),
            ..Default::default()
        }]);

        assert!(!state.is_submitting());
        state.begin_submit();
        assert!(state.is_submitting());
        // a valid form still refuses to submit while the handler runs
        assert!(state.try_submit().is_none());
        state.finish_submit();
        assert!(!state.is_submitting());
        assert!(state.try_submit().is_some());
    }

    #[test]
    fn test_successful_submit_clears_stale_errors() {
        let state = state_for(vec![FieldConfig {
            name: "username".to_string(),
            field_type: "text".to_string(),
            required: true,
            ..Default::default()
        }]);

        assert!(state.try_submit().is_none());
        assert!(state.error("username").is_some());

        state.set_text("username", "ada".to_string());
        assert!(state.try_submit().is_some());
        assert_eq!(state.error("username"), None);
    }
}
