//! Core types for configuration-driven form generation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ============================================================================
// Field Configuration
// ============================================================================

/// One choice in a select, radio or checkbox field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Declarative description of a single form control.
///
/// Supplied by the hosting application as JSON. `name` is the form field
/// key, used both as the label text and as the key into the live value and
/// validation records. Unrecognized JSON keys are ignored; missing optional
/// keys are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    /// Stable identity, not used as the form key
    #[serde(default)]
    pub id: String,
    /// Form field key and label text; must be unique per configuration
    pub name: String,
    /// Control kind, e.g. "text", "select", "checkbox"
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether an empty or unselected value fails validation
    #[serde(default)]
    pub required: bool,
    /// Pattern the value must match (text-like fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// For "select": enables multi-choice semantics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_select: Option<bool>,
    /// Choices for select/radio/checkbox fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Accepted file extensions/MIME patterns (file fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format_supported: Option<Vec<String>>,
}

// ============================================================================
// Field Kind
// ============================================================================

/// Closed set of renderable control kinds.
///
/// The `type` string and the `multipleSelect` flag collapse into one
/// variant here so rendering and schema derivation dispatch over a single
/// exhaustive `match`. Anything unrecognized maps to `Unknown`, which
/// renders nothing and contributes no validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    SelectOne,
    SelectMany,
    Radio,
    Checkbox,
    File,
    Unknown,
}

impl FieldKind {
    /// Classify a field descriptor
    pub fn of(field: &FieldConfig) -> Self {
        match field.field_type.as_str() {
            "text" => FieldKind::Text,
            "password" => FieldKind::Password,
            "select" => {
                if field.multiple_select.unwrap_or(false) {
                    FieldKind::SelectMany
                } else {
                    FieldKind::SelectOne
                }
            }
            "radio" => FieldKind::Radio,
            "checkbox" => FieldKind::Checkbox,
            "file" => FieldKind::File,
            _ => FieldKind::Unknown,
        }
    }

    /// Whether the field's value is a collection rather than a scalar
    pub fn is_multi(&self) -> bool {
        matches!(self, FieldKind::SelectMany | FieldKind::Checkbox)
    }

    /// Whether the field renders from an options list
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldKind::SelectOne | FieldKind::SelectMany | FieldKind::Radio | FieldKind::Checkbox
        )
    }
}

// ============================================================================
// Field Value
// ============================================================================

/// Live or initial value of one field: a single string or a collection.
///
/// Serializes untagged, so a submitted record looks like
/// `{"email": "a@b.co", "roles": ["admin"]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Many(Vec<String>),
}

/// Full value record keyed by field name
pub type FormValues = HashMap<String, FieldValue>;

impl FieldValue {
    /// Empty scalar value
    pub fn empty_single() -> Self {
        FieldValue::Single(String::new())
    }

    /// Empty collection value
    pub fn empty_many() -> Self {
        FieldValue::Many(Vec::new())
    }

    /// Empty string or empty collection
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(s) => s.is_empty(),
            FieldValue::Many(v) => v.is_empty(),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            FieldValue::Single(_) => None,
            FieldValue::Many(v) => Some(v),
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// A descriptor that cannot produce a working control.
///
/// Local to the offending field: the rest of the form derives and renders
/// normally, while this field shows an inline notice instead of a control.
#[derive(Clone, Debug, Error)]
pub enum ConfigError {
    #[error("field `{field}`: invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("field `{field}`: choice field has no options")]
    MissingOptions { field: String },
}

impl ConfigError {
    /// Name of the field the error belongs to
    pub fn field(&self) -> &str {
        match self {
            ConfigError::InvalidPattern { field, .. } => field,
            ConfigError::MissingOptions { field } => field,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_mapping() {
        let mut field = FieldConfig {
            name: "f".to_string(),
            field_type: "text".to_string(),
            ..Default::default()
        };
        assert_eq!(FieldKind::of(&field), FieldKind::Text);

        field.field_type = "password".to_string();
        assert_eq!(FieldKind::of(&field), FieldKind::Password);

        field.field_type = "select".to_string();
        assert_eq!(FieldKind::of(&field), FieldKind::SelectOne);
        field.multiple_select = Some(true);
        assert_eq!(FieldKind::of(&field), FieldKind::SelectMany);

        field.field_type = "radio".to_string();
        assert_eq!(FieldKind::of(&field), FieldKind::Radio);
        field.field_type = "checkbox".to_string();
        assert_eq!(FieldKind::of(&field), FieldKind::Checkbox);
        field.field_type = "file".to_string();
        assert_eq!(FieldKind::of(&field), FieldKind::File);

        field.field_type = "date".to_string();
        assert_eq!(FieldKind::of(&field), FieldKind::Unknown);
    }

    #[test]
    fn test_multi_and_choice_predicates() {
        assert!(FieldKind::SelectMany.is_multi());
        assert!(FieldKind::Checkbox.is_multi());
        assert!(!FieldKind::SelectOne.is_multi());
        assert!(!FieldKind::Radio.is_multi());
        assert!(FieldKind::Radio.is_choice());
        assert!(!FieldKind::File.is_choice());
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let json = r#"{
            "id": "f-email",
            "name": "email",
            "type": "text",
            "required": true,
            "regex": "^\\S+@\\S+$",
            "someFutureKey": 42
        }"#;
        let field: FieldConfig = serde_json::from_str(json).unwrap();
        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, "text");
        assert!(field.required);
        assert_eq!(field.regex.as_deref(), Some("^\\S+@\\S+$"));
        assert!(field.multiple_select.is_none());
        assert!(field.options.is_none());
        assert!(field.file_format_supported.is_none());
    }

    #[test]
    fn test_config_optional_keys_default() {
        let json = r#"{"name": "plain", "type": "text"}"#;
        let field: FieldConfig = serde_json::from_str(json).unwrap();
        assert_eq!(field.id, "");
        assert!(!field.required);
        assert!(field.regex.is_none());
    }

    #[test]
    fn test_config_deserializes_options_and_formats() {
        let json = r#"{
            "name": "roles",
            "type": "checkbox",
            "required": true,
            "options": [
                {"label": "Admin", "value": "admin"},
                {"label": "User", "value": "user"}
            ]
        }"#;
        let field: FieldConfig = serde_json::from_str(json).unwrap();
        let options = field.options.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "Admin");
        assert_eq!(options[0].value, "admin");
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let single = serde_json::to_string(&FieldValue::Single("a@b.co".to_string())).unwrap();
        assert_eq!(single, r#""a@b.co""#);

        let many =
            serde_json::to_string(&FieldValue::Many(vec!["admin".to_string()])).unwrap();
        assert_eq!(many, r#"["admin"]"#);
    }

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::empty_single().is_empty());
        assert!(FieldValue::empty_many().is_empty());
        assert!(!FieldValue::Single("x".to_string()).is_empty());
        assert!(!FieldValue::Many(vec!["x".to_string()]).is_empty());
    }

    #[test]
    fn test_config_error_reports_field() {
        let err = ConfigError::MissingOptions {
            field: "country".to_string(),
        };
        assert_eq!(err.field(), "country");
        assert!(err.to_string().contains("country"));
    }
}
