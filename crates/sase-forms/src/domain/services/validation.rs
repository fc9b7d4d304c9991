//! Validation engine
//!
//! Maps a field's declared type, required flag and raw value to an optional
//! error message. Whole-form validation is synchronous and total.

use crate::domain::value_objects::field::ValidationRule;
use crate::domain::value_objects::{FieldType, FormSchema, FormValues, ValidationErrors};

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_SELECT: &str = "Please select an option";
pub const MSG_NUMBER: &str = "Must be a valid number";
pub const MSG_EMAIL: &str = "Must be a valid email";
pub const MSG_PASSWORD: &str = "Must be at least 6 characters";

const MIN_PASSWORD_LEN: usize = 6;

/// Outcome of validating a whole form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: ValidationErrors,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a single raw value.
///
/// Optional fields with an empty value always pass. Lengths are counted in
/// UTF-16 code units.
pub fn validate_field(field_type: FieldType, required: bool, raw: &str) -> Option<&'static str> {
    if !required && raw.is_empty() {
        return None;
    }

    match field_type.rule() {
        ValidationRule::Required => raw.is_empty().then_some(MSG_REQUIRED),
        ValidationRule::Selection => raw.is_empty().then_some(MSG_SELECT),
        ValidationRule::Number => {
            if raw.is_empty() {
                Some(MSG_REQUIRED)
            } else if !is_number(raw) {
                Some(MSG_NUMBER)
            } else {
                None
            }
        }
        ValidationRule::Email => {
            if raw.is_empty() {
                Some(MSG_REQUIRED)
            } else if !is_email(raw) {
                Some(MSG_EMAIL)
            } else {
                None
            }
        }
        ValidationRule::Password => {
            if raw.is_empty() {
                Some(MSG_REQUIRED)
            } else if raw.encode_utf16().count() < MIN_PASSWORD_LEN {
                Some(MSG_PASSWORD)
            } else {
                None
            }
        }
    }
}

/// Validate every field of `schema` in declaration order.
///
/// Fields missing from `values` are treated as empty.
pub fn validate_form(schema: &FormSchema, values: &FormValues) -> ValidationReport {
    let mut errors = ValidationErrors::new();
    for field in schema.fields() {
        if let Some(message) = validate_field(field.field_type, field.required, values.get(&field.name)) {
            errors.insert(field.name.clone(), message);
        }
    }
    ValidationReport { errors }
}

/// Numeric check: decimal/exponent notation, `Infinity`, and `0x`/`0o`/`0b`
/// integer literals of any length, surrounding whitespace ignored. A
/// whitespace-only string reads as zero.
pub fn is_number(raw: &str) -> bool {
    let s = raw.trim();
    if s.is_empty() {
        return true;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if unsigned == "Infinity" {
        return true;
    }
    // no "inf" / "nan" spellings
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return false;
    }
    s.parse::<f64>().is_ok_and(|n| !n.is_nan())
}

/// `local@domain.tld`: no whitespace or extra `@`, a dot inside the domain
/// with characters on both sides.
pub fn is_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
