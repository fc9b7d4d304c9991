//! Field renderer
//!
//! Two directions per field type:
//! - `(FieldSpec, current value) -> Control`, the state a presentation layer draws
//! - raw input -> normalized string value
//!
//! Neither direction keeps state of its own; checkbox-group selections live in
//! a [`CheckboxGroup`] owned by the controller.

use serde::Serialize;

use super::files::DropZone;
use crate::domain::value_objects::{FieldSpec, FieldType};
use crate::{FormsError, Result};

pub const DEFAULT_RANGE_MIN: f64 = 0.0;
pub const DEFAULT_RANGE_MAX: f64 = 100.0;

/// One selectable option of a dropdown, radio or checkbox group
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub selected: bool,
}

/// Rendered control state
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    /// Single-line input: text, number, email, tel, date, month, password, url
    Input {
        input_type: FieldType,
        value: String,
        placeholder: String,
    },
    TextArea {
        value: String,
        placeholder: String,
    },
    Dropdown {
        placeholder: String,
        options: Vec<Choice>,
    },
    RadioGroup {
        options: Vec<Choice>,
    },
    CheckboxGroup {
        options: Vec<Choice>,
    },
    Checkbox {
        label: String,
        checked: bool,
    },
    Range {
        min: f64,
        max: f64,
        value: String,
        /// Value label shown between the bounds, `"0"` when unset
        display: String,
    },
    FileUpload {
        accept: Option<String>,
        multiple: bool,
        /// Drop-zone call to action
        prompt: String,
        hint: String,
        selected: Option<String>,
    },
}

/// Render a field from its spec and current raw value
pub fn render_field(spec: &FieldSpec, value: &str) -> Control {
    match spec.field_type {
        FieldType::Text
        | FieldType::Number
        | FieldType::Email
        | FieldType::Tel
        | FieldType::Date
        | FieldType::Month
        | FieldType::Password
        | FieldType::Url => Control::Input {
            input_type: spec.field_type,
            value: value.to_string(),
            placeholder: format!("Enter {}", spec.label),
        },
        FieldType::Textarea => Control::TextArea {
            value: value.to_string(),
            placeholder: format!("Enter {}", spec.label),
        },
        FieldType::Dropdown => Control::Dropdown {
            placeholder: format!("Select {}", spec.label),
            options: single_choices(spec, value),
        },
        FieldType::Radio => Control::RadioGroup {
            options: single_choices(spec, value),
        },
        FieldType::Checkbox if spec.is_checkbox_group() => Control::CheckboxGroup {
            options: CheckboxGroup::from_value(spec.options(), value).choices(),
        },
        FieldType::Checkbox => Control::Checkbox {
            label: spec.label.clone(),
            checked: value == "true",
        },
        FieldType::Range => {
            let (min, max) = range_bounds(spec);
            Control::Range {
                min,
                max,
                value: value.to_string(),
                display: if value.is_empty() { "0".into() } else { value.to_string() },
            }
        }
        FieldType::File => Control::FileUpload {
            accept: spec.accept.clone(),
            multiple: spec.multiple,
            prompt: DropZone::default().prompt().to_string(),
            hint: file_hint(spec),
            selected: (!value.is_empty()).then(|| value.to_string()),
        },
    }
}

fn single_choices(spec: &FieldSpec, value: &str) -> Vec<Choice> {
    spec.options()
        .iter()
        .map(|o| Choice {
            label: o.clone(),
            selected: o == value,
        })
        .collect()
}

fn file_hint(spec: &FieldSpec) -> String {
    let mut hint = match &spec.accept {
        Some(accept) => format!("Accepted formats: {accept}"),
        None => "All file types accepted".to_string(),
    };
    if spec.multiple {
        hint.push_str(" • Multiple files allowed");
    }
    hint
}

/// Numeric bounds of a range field; unset or unparseable bounds use 0..=100
pub fn range_bounds(spec: &FieldSpec) -> (f64, f64) {
    let parse = |bound: &Option<String>, default: f64| {
        bound
            .as_deref()
            .and_then(|b| b.trim().parse::<f64>().ok())
            .filter(|b| b.is_finite())
            .unwrap_or(default)
    };
    let min = parse(&spec.min, DEFAULT_RANGE_MIN);
    let max = parse(&spec.max, DEFAULT_RANGE_MAX);
    (min, max.max(min))
}

/// Clamp a slider position into the field's bounds and encode it
pub fn normalize_range(spec: &FieldSpec, position: f64) -> Result<String> {
    if position.is_nan() {
        return Err(invalid(spec, "range position is not a number"));
    }
    let (min, max) = range_bounds(spec);
    Ok(position.clamp(min, max).to_string())
}

/// Normalize a raw textual input for `spec`.
///
/// Free-text types pass through unchanged; choice types must name a declared
/// option (or be empty to clear the field).
pub fn normalize_text(spec: &FieldSpec, raw: &str) -> Result<String> {
    match spec.field_type {
        FieldType::Dropdown | FieldType::Radio => {
            if raw.is_empty() || spec.options().iter().any(|o| o == raw) {
                Ok(raw.to_string())
            } else {
                Err(invalid(spec, &format!("'{raw}' is not one of the options")))
            }
        }
        FieldType::Checkbox if spec.is_checkbox_group() => {
            let group = CheckboxGroup::parse_strict(spec, raw)?;
            Ok(group.value())
        }
        FieldType::Checkbox => match raw {
            "true" | "false" => Ok(raw.to_string()),
            "" => Ok("false".to_string()),
            _ => Err(invalid(spec, "expected 'true' or 'false'")),
        },
        FieldType::Range => {
            if raw.is_empty() {
                return Ok(String::new());
            }
            let position = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(spec, &format!("'{raw}' is not a number")))?;
            normalize_range(spec, position)
        }
        FieldType::File if !raw.is_empty() => {
            Err(invalid(spec, "file fields take a file selection"))
        }
        _ => Ok(raw.to_string()),
    }
}

fn invalid(spec: &FieldSpec, reason: &str) -> FormsError {
    FormsError::InvalidValue {
        field: spec.name.clone(),
        reason: reason.to_string(),
    }
}

/// Checked state of every option of a checkbox group.
///
/// The joined value lists checked options in declaration order, so toggling
/// "Music" then "Sports" on `[Sports, Music, ...]` yields `"Sports,Music"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckboxGroup {
    options: Vec<(String, bool)>,
}

impl CheckboxGroup {
    /// Seed from a stored comma-joined value; unknown entries are ignored
    pub fn from_value(options: &[String], value: &str) -> Self {
        let checked: Vec<&str> = if value.is_empty() { Vec::new() } else { value.split(',').collect() };
        Self {
            options: options
                .iter()
                .map(|o| (o.clone(), checked.contains(&o.as_str())))
                .collect(),
        }
    }

    fn parse_strict(spec: &FieldSpec, raw: &str) -> Result<Self> {
        if !raw.is_empty() {
            if let Some(unknown) = raw.split(',').find(|p| !spec.options().iter().any(|o| o == p)) {
                return Err(invalid(spec, &format!("'{unknown}' is not one of the options")));
            }
        }
        Ok(Self::from_value(spec.options(), raw))
    }

    /// Check or uncheck one option
    pub fn set(&mut self, option: &str, checked: bool) -> bool {
        match self.options.iter_mut().find(|(o, _)| o == option) {
            Some(entry) => {
                entry.1 = checked;
                true
            }
            None => false,
        }
    }

    pub fn is_checked(&self, option: &str) -> bool {
        self.options.iter().any(|(o, c)| *c && o == option)
    }

    /// Comma-joined checked options in declaration order
    pub fn value(&self) -> String {
        self.options
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|(o, _)| o.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn choices(&self) -> Vec<Choice> {
        self.options
            .iter()
            .map(|(label, selected)| Choice {
                label: label.clone(),
                selected: *selected,
            })
            .collect()
    }
}
