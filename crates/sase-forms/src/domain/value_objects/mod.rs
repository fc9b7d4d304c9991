//! Value Objects module
//!
//! Immutable, validated domain primitives.

pub mod field;
pub mod schema;
pub mod values;

pub use field::{FieldSpec, FieldType};
pub use schema::FormSchema;
pub use values::{FormValues, ValidationErrors};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a committed record
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Schema key selecting which set of fields is shown (`userInfo`, `payment`, ...)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormType(String);

impl FormType {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form of the key, e.g. `jobApplication` -> `job application`
    pub fn humanize(&self) -> String {
        humanize_key(&self.0)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FormType {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for FormType {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Split a camelCase key into lower-case words: `zipCode` -> `zip code`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
