//! Form events
//!
//! Raised by the controller as state changes; drained with
//! [`crate::FormController::take_events`].

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{FormType, RecordId};

#[derive(Clone, Debug, PartialEq)]
pub enum FormEvent {
    SchemaLoaded {
        form_type: FormType,
        field_count: usize,
    },

    SchemaLoadFailed {
        form_type: FormType,
        reason: String,
    },

    EditStarted {
        record_id: RecordId,
        form_type: FormType,
    },

    RecordCreated {
        record_id: RecordId,
        form_type: FormType,
        created_at: DateTime<Utc>,
    },

    RecordUpdated {
        record_id: RecordId,
        form_type: FormType,
        updated_at: DateTime<Utc>,
    },

    RecordDeleted {
        record_id: RecordId,
    },
}

impl FormEvent {
    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            FormEvent::SchemaLoaded { .. } => "schema.loaded",
            FormEvent::SchemaLoadFailed { .. } => "schema.load_failed",
            FormEvent::EditStarted { .. } => "record.edit_started",
            FormEvent::RecordCreated { .. } => "record.created",
            FormEvent::RecordUpdated { .. } => "record.updated",
            FormEvent::RecordDeleted { .. } => "record.deleted",
        }
    }

    /// Record this event refers to, if any
    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            FormEvent::EditStarted { record_id, .. }
            | FormEvent::RecordCreated { record_id, .. }
            | FormEvent::RecordUpdated { record_id, .. }
            | FormEvent::RecordDeleted { record_id } => Some(record_id),
            FormEvent::SchemaLoaded { .. } | FormEvent::SchemaLoadFailed { .. } => None,
        }
    }
}
