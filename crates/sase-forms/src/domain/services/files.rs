//! File selection handling
//!
//! Checks a pending selection against a field's `accept` expression and turns
//! it into the stored value. A selection is all-or-nothing: one bad file
//! rejects every file in it.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FieldSpec, FieldType};
use crate::{FormsError, Result};

pub const MSG_INVALID_FILE_TYPE: &str =
    "Invalid file type. Please upload files matching the accepted formats.";
pub const MSG_SINGLE_FILE: &str = "Only one file can be uploaded for this field.";

/// Separator between file names in a stored file value
pub const FILE_NAME_SEPARATOR: &str = ", ";

/// A file picked or dropped by the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    /// MIME type as reported by the picker, empty when unknown
    #[serde(default)]
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// File with no reported MIME type
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

#[derive(Debug)]
enum AcceptRule {
    /// `.pdf` - case-insensitive file name suffix
    Suffix(String),
    /// `image/*` - whole MIME type, `*` matching any run of characters
    Mime(Regex),
}

/// Parsed `accept` expression, e.g. `.pdf,.doc,image/*`
#[derive(Debug, Default)]
pub struct AcceptFilter {
    rules: Vec<AcceptRule>,
}

impl AcceptFilter {
    pub fn parse(accept: &str) -> Self {
        let mut rules = Vec::new();
        for token in accept.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token.starts_with('.') {
                rules.push(AcceptRule::Suffix(token.to_lowercase()));
                continue;
            }
            let pattern = format!("(?i)^{}$", regex::escape(token).replace(r"\*", ".*"));
            match Regex::new(&pattern) {
                Ok(re) => rules.push(AcceptRule::Mime(re)),
                Err(e) => tracing::warn!(token, error = %e, "ignoring unusable accept token"),
            }
        }
        Self { rules }
    }

    /// An empty filter accepts everything
    pub fn accepts(&self, file: &SelectedFile) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let name = file.name.to_lowercase();
        self.rules.iter().any(|rule| match rule {
            AcceptRule::Suffix(suffix) => name.ends_with(suffix.as_str()),
            AcceptRule::Mime(re) => re.is_match(&file.mime_type),
        })
    }
}

/// Validate a selection for `field` and produce the value to store.
///
/// Returns `Ok(None)` for an empty selection, which leaves the field untouched.
pub fn accept_selection(field: &FieldSpec, files: &[SelectedFile]) -> Result<Option<String>> {
    if field.field_type != FieldType::File {
        return Err(FormsError::FileRejected(format!("'{}' is not a file field", field.name)));
    }
    if files.is_empty() {
        return Ok(None);
    }
    if files.len() > 1 && !field.multiple {
        return Err(FormsError::FileRejected(MSG_SINGLE_FILE.into()));
    }

    let filter = field.accept.as_deref().map(AcceptFilter::parse).unwrap_or_default();
    if let Some(bad) = files.iter().find(|f| !filter.accepts(f)) {
        tracing::warn!(field = %field.name, file = %bad.name, "file selection rejected");
        return Err(FormsError::FileRejected(MSG_INVALID_FILE_TYPE.into()));
    }

    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    Ok(Some(names.join(FILE_NAME_SEPARATOR)))
}

/// Drag-over highlight of an upload control. Purely transient: it never
/// reaches the form values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropZone {
    dragging: bool,
}

impl DropZone {
    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// A drop ends the drag regardless of whether the files are accepted
    pub fn drop_files(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn prompt(&self) -> &'static str {
        if self.dragging {
            "Drop files here"
        } else {
            "Click to upload or drag and drop"
        }
    }
}
