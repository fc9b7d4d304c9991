//! Record Aggregate
//!
//! A committed form submission. Records are never edited field by field:
//! an edit produces a whole replacement that keeps the id and form type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{FormType, FormValues, RecordId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    id: RecordId,
    form_type: FormType,
    timestamp: DateTime<Utc>,
    values: FormValues,
}

impl Record {
    /// Create a record with a freshly minted id
    pub fn create(form_type: FormType, values: FormValues) -> Self {
        Self::with_id(RecordId::new(), form_type, values)
    }

    pub fn with_id(id: RecordId, form_type: FormType, values: FormValues) -> Self {
        Self {
            id,
            form_type,
            timestamp: Utc::now(),
            values,
        }
    }

    /// Replacement for this record: same id and form type, new values and timestamp
    pub fn replaced_by(&self, values: FormValues) -> Self {
        let now = Utc::now();
        Self {
            id: self.id.clone(),
            form_type: self.form_type.clone(),
            // Keep timestamps monotonic per record even on coarse clocks.
            timestamp: if now > self.timestamp { now } else { self.timestamp },
            values,
        }
    }

    pub fn id(&self) -> &RecordId { &self.id }
    pub fn form_type(&self) -> &FormType { &self.form_type }
    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }
    pub fn values(&self) -> &FormValues { &self.values }
    pub fn value(&self, name: &str) -> &str { self.values.get(name) }
}
