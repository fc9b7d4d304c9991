//! Outbound ports
//!
//! Hexagonal architecture: the interfaces infrastructure must implement.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::Record;
use crate::domain::value_objects::{FormSchema, FormType, RecordId};
use crate::Result;

/// Source of form schemas.
///
/// May suspend (remote fetch, simulated latency); callers treat every call as
/// a potential await point.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Schema for `form_type`, or `FormsError::SchemaNotFound`
    async fn get_schema(&self, form_type: &FormType) -> Result<Arc<FormSchema>>;
}

/// Committed records, in insertion order.
///
/// Ids are unique across the whole store, not per form type.
pub trait RecordRepository: Send + Sync {
    /// Append a record; fails with `DuplicateRecord` if the id is taken
    fn append(&self, record: Record) -> Result<()>;

    /// Replace the record with `id` in place; fails with `RecordNotFound`
    fn replace(&self, id: &RecordId, record: Record) -> Result<()>;

    /// Remove a record; fails with `RecordNotFound`
    fn remove(&self, id: &RecordId) -> Result<Record>;

    fn get(&self, id: &RecordId) -> Option<Record>;

    fn contains(&self, id: &RecordId) -> bool;

    /// Records of one form type in insertion order
    fn list_by_type(&self, form_type: &FormType) -> Vec<Record>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// User-facing notification surface. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}
