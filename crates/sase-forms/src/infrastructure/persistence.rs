//! In-memory record store
//!
//! Process-scoped: starts empty, lives as long as its owner, never persisted.

use parking_lot::RwLock;

use crate::domain::aggregates::Record;
use crate::domain::value_objects::{FormType, RecordId};
use crate::ports::outbound::RecordRepository;
use crate::{FormsError, Result};

/// Records in insertion order; replacement keeps a record's position
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Every record regardless of form type
    pub fn all(&self) -> Vec<Record> {
        self.records.read().clone()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordRepository for InMemoryRecordStore {
    fn append(&self, record: Record) -> Result<()> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(FormsError::DuplicateRecord(record.id().to_string()));
        }
        records.push(record);
        Ok(())
    }

    fn replace(&self, id: &RecordId, record: Record) -> Result<()> {
        let mut records = self.records.write();
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| FormsError::RecordNotFound(id.to_string()))?;
        *slot = record;
        Ok(())
    }

    fn remove(&self, id: &RecordId) -> Result<Record> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| FormsError::RecordNotFound(id.to_string()))?;
        Ok(records.remove(index))
    }

    fn get(&self, id: &RecordId) -> Option<Record> {
        self.records.read().iter().find(|r| r.id() == id).cloned()
    }

    fn contains(&self, id: &RecordId) -> bool {
        self.records.read().iter().any(|r| r.id() == id)
    }

    fn list_by_type(&self, form_type: &FormType) -> Vec<Record> {
        self.records
            .read()
            .iter()
            .filter(|r| r.form_type() == form_type)
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
