//! Form Schema Value Object
//!
//! Ordered, validated sequence of field specs for one form type.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::field::{FieldSpec, FieldType};
use crate::{FormsError, Result};

/// Ordered field set of one form type. Immutable once built.
///
/// # Invariants
/// - Field names are unique
/// - Dropdown and radio fields carry at least one option
/// - A checkbox with an options list has at least one option
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
struct RawSchema {
    fields: Vec<FieldSpec>,
}

impl TryFrom<RawSchema> for FormSchema {
    type Error = FormsError;

    fn try_from(raw: RawSchema) -> Result<Self> {
        Self::new(raw.fields)
    }
}

impl FormSchema {
    /// Build a schema, checking the field invariants
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name.is_empty() {
                return Err(FormsError::InvalidSchema("field name cannot be empty".into()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FormsError::InvalidSchema(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
            let has_options = field.options.as_ref().is_some_and(|o| !o.is_empty());
            if field.field_type.requires_options() && !has_options {
                return Err(FormsError::InvalidSchema(format!(
                    "{} field '{}' needs at least one option",
                    field.field_type, field.name
                )));
            }
            if field.field_type == FieldType::Checkbox && field.options.is_some() && !has_options {
                return Err(FormsError::InvalidSchema(format!(
                    "checkbox group '{}' has an empty options list",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in declaration order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_rejected() {
        let result = FormSchema::new(vec![
            FieldSpec::new("email", FieldType::Email, "Email"),
            FieldSpec::new("email", FieldType::Text, "Email again"),
        ]);
        assert!(matches!(result, Err(FormsError::InvalidSchema(_))));
    }

    #[test]
    fn test_dropdown_without_options_rejected() {
        let result = FormSchema::new(vec![FieldSpec::new("state", FieldType::Dropdown, "State")]);
        assert!(result.is_err());

        let result = FormSchema::new(vec![
            FieldSpec::new("state", FieldType::Radio, "State").with_options(&[]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_checkbox_needs_no_options() {
        let schema = FormSchema::new(vec![
            FieldSpec::new("newsletter", FieldType::Checkbox, "Subscribe"),
        ])
        .unwrap();
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let json = r#"{ "fields": [
            { "name": "a", "type": "text", "label": "A" },
            { "name": "a", "type": "text", "label": "B" }
        ] }"#;
        assert!(serde_json::from_str::<FormSchema>(json).is_err());

        let json = r#"{ "fields": [
            { "name": "a", "type": "text", "label": "A", "required": true },
            { "name": "b", "type": "radio", "label": "B", "options": ["x", "y"] }
        ] }"#;
        let schema: FormSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.position("b"), Some(1));
        assert_eq!(schema.required_fields().count(), 1);
    }
}
