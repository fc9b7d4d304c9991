//! Field Spec Value Object
//!
//! Declarative description of one input control.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of supported field types.
///
/// Every variant maps to exactly one render strategy
/// ([`crate::domain::services::render_field`]) and one validation rule
/// ([`FieldType::rule`]); adding a type means extending both matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Tel,
    Date,
    Month,
    Password,
    Url,
    Textarea,
    Dropdown,
    Radio,
    Checkbox,
    File,
    Range,
}

/// Validation rule applied to a field type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationRule {
    /// Non-empty check
    Required,
    /// Non-empty check with the "select an option" message
    Selection,
    Number,
    Email,
    Password,
}

impl FieldType {
    pub const ALL: [FieldType; 14] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Tel,
        FieldType::Date,
        FieldType::Month,
        FieldType::Password,
        FieldType::Url,
        FieldType::Textarea,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::File,
        FieldType::Range,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::Month => "month",
            FieldType::Password => "password",
            FieldType::Url => "url",
            FieldType::Textarea => "textarea",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::File => "file",
            FieldType::Range => "range",
        }
    }

    /// Rule used by the validation engine. Types without a dedicated rule
    /// fall back to the plain required check.
    pub fn rule(&self) -> ValidationRule {
        match self {
            FieldType::Number => ValidationRule::Number,
            FieldType::Email => ValidationRule::Email,
            FieldType::Password => ValidationRule::Password,
            FieldType::Dropdown => ValidationRule::Selection,
            FieldType::Text
            | FieldType::Date
            | FieldType::Tel
            | FieldType::Month
            | FieldType::Url
            | FieldType::Textarea
            | FieldType::Radio
            | FieldType::Checkbox
            | FieldType::File
            | FieldType::Range => ValidationRule::Required,
        }
    }

    /// Dropdown and radio fields are meaningless without choices.
    pub fn requires_options(&self) -> bool {
        matches!(self, FieldType::Dropdown | FieldType::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of one input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// File-type filter, e.g. `.pdf,.doc` or `image/*`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            label: label.into(),
            required: false,
            options: None,
            accept: None,
            multiple: false,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn bounds(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self.max = Some(max.into());
        self
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Checkbox with options: value is the comma-joined list of checked options
    pub fn is_checkbox_group(&self) -> bool {
        self.field_type == FieldType::Checkbox && self.options.is_some()
    }

    /// Checkbox without options: value is `"true"` / `"false"`
    pub fn is_single_checkbox(&self) -> bool {
        self.field_type == FieldType::Checkbox && self.options.is_none()
    }
}
