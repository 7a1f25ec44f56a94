//! Derivation of initial values and validation rules from a field
//! configuration list.
//!
//! One ordered pass over the descriptors produces:
//! - the initial-values record handed to the live form state
//! - the validation-rule record executed on change, blur and submit
//! - configuration errors for descriptors that cannot produce a control
//!
//! Derivation is pure and idempotent: the same input always yields the
//! same records, and nothing here touches live state.

use regex::Regex;
use std::collections::HashMap;

use super::types::{ConfigError, FieldConfig, FieldKind, FieldValue, FormValues};

// ============================================================================
// Validation Rules
// ============================================================================

/// Constraint executed against one field's live value
#[derive(Clone, Debug)]
pub enum ValueRule {
    /// Non-empty string required
    Required,
    /// Non-empty string required and it must match the pattern.
    /// An empty value fails the required half, never the pattern half.
    Pattern(Regex),
    /// Collection with at least one element
    MinOne,
    /// Multi-valued field with no constraint
    Optional,
}

impl ValueRule {
    /// Run the rule, yielding the inline error message on failure
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        match self {
            ValueRule::Required => {
                if value.is_empty() {
                    Err("Required".to_string())
                } else {
                    Ok(())
                }
            }
            ValueRule::Pattern(pattern) => match value {
                FieldValue::Single(s) if s.is_empty() => Err("Required".to_string()),
                FieldValue::Single(s) => {
                    if pattern.is_match(s) {
                        Ok(())
                    } else {
                        Err("Invalid format".to_string())
                    }
                }
                // patterns only apply to scalar values
                FieldValue::Many(_) => Ok(()),
            },
            ValueRule::MinOne => {
                if value.is_empty() {
                    Err("At least one selection is required".to_string())
                } else {
                    Ok(())
                }
            }
            ValueRule::Optional => Ok(()),
        }
    }
}

// `Regex` carries no equality; compare pattern source instead so derived
// rule records can be compared for equality in tests and by callers.
impl PartialEq for ValueRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueRule::Required, ValueRule::Required)
            | (ValueRule::MinOne, ValueRule::MinOne)
            | (ValueRule::Optional, ValueRule::Optional) => true,
            (ValueRule::Pattern(a), ValueRule::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for ValueRule {}

// ============================================================================
// Derived Schema
// ============================================================================

/// Output of one derivation pass. The records are built once and never
/// mutated afterwards; the live form state clones what it needs.
#[derive(Clone, Debug, Default)]
pub struct DerivedSchema {
    /// Field name -> initial value
    pub initial_values: FormValues,
    /// Field name -> validation rule
    pub rules: HashMap<String, ValueRule>,
    /// Descriptors rejected at derivation time
    pub errors: Vec<ConfigError>,
}

/// Derive initial values and validation rules from a descriptor list.
///
/// Duplicate names silently overwrite earlier entries (last descriptor
/// wins). Unknown field kinds contribute neither a value nor a rule, so
/// they can never block submission. A descriptor with an invalid pattern
/// or a choice kind without options is recorded in `errors` and excluded
/// from both records; the failure stays local to that field.
pub fn derive_schema(config: &[FieldConfig]) -> DerivedSchema {
    let mut schema = DerivedSchema::default();

    for field in config {
        let kind = FieldKind::of(field);

        if kind == FieldKind::Unknown {
            continue;
        }

        if kind.is_choice()
            && field
                .options
                .as_ref()
                .map(|options| options.is_empty())
                .unwrap_or(true)
        {
            schema.errors.push(ConfigError::MissingOptions {
                field: field.name.clone(),
            });
            continue;
        }

        if kind.is_multi() {
            schema
                .initial_values
                .insert(field.name.clone(), FieldValue::empty_many());
            let rule = if field.required {
                ValueRule::MinOne
            } else {
                ValueRule::Optional
            };
            schema.rules.insert(field.name.clone(), rule);
            continue;
        }

        // single-valued kinds: a present pattern supersedes the plain
        // required rule, independent of the `required` flag
        match field.regex.as_deref().filter(|p| !p.is_empty()) {
            Some(pattern) => match Regex::new(pattern) {
                Ok(compiled) => {
                    schema
                        .initial_values
                        .insert(field.name.clone(), FieldValue::empty_single());
                    schema
                        .rules
                        .insert(field.name.clone(), ValueRule::Pattern(compiled));
                }
                Err(source) => {
                    schema.errors.push(ConfigError::InvalidPattern {
                        field: field.name.clone(),
                        pattern: pattern.to_string(),
                        source,
                    });
                }
            },
            None => {
                schema
                    .initial_values
                    .insert(field.name.clone(), FieldValue::empty_single());
                if field.required {
                    schema.rules.insert(field.name.clone(), ValueRule::Required);
                }
            }
        }
    }

    schema
}

/// Execute every rule against a full value record.
///
/// Returns field name -> error message for each failing rule. A missing
/// value is treated as empty.
pub fn validate_values(
    rules: &HashMap<String, ValueRule>,
    values: &FormValues,
) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    let empty = FieldValue::empty_single();

    for (name, rule) in rules {
        let value = values.get(name).unwrap_or(&empty);
        if let Err(message) = rule.check(value) {
            errors.insert(name.clone(), message);
        }
    }

    errors
}

// ============================================================================
// Tests
// ============================================================================
