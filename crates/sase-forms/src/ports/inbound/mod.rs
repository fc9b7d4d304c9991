//! Inbound ports
//!
//! The command set a presentation layer sends to a form session. Commands are
//! consumed one at a time, in the order they were sent.

use serde::{Deserialize, Serialize};

use crate::application::{LoadTicket, SubmitOutcome};
use crate::domain::services::SelectedFile;
use crate::domain::value_objects::{FormType, RecordId};

/// Raw input event for one field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldInput {
    /// Typed or selected text (text-like fields, dropdown, radio, range)
    Text { value: String },
    /// One box of a checkbox group
    Toggle { option: String, checked: bool },
    /// Single checkbox
    Checked { checked: bool },
    /// Picked or dropped files
    Files { files: Vec<SelectedFile> },
    /// Slider position
    Range { position: f64 },
}

impl FieldInput {
    pub fn text(value: impl Into<String>) -> Self {
        FieldInput::Text { value: value.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FormCommand {
    FormTypeChanged { form_type: FormType },
    FieldChanged { name: String, input: FieldInput },
    SubmitRequested,
    EditRequested { id: RecordId },
    EditCancelled,
    DeleteRequested { id: RecordId },
}

/// What a command did
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// A schema load was issued; the form is `Loading` until it resolves
    Loading(LoadTicket),
    /// State changed without a load
    Applied,
    Submitted(SubmitOutcome),
    Deleted(RecordId),
}
