//! In-memory record storage behind the reference store.

use uuid::Uuid;

use crate::models::{Record, RecordId, RecordPatch};

/// Records kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn list(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        self.position_of(id).map(|i| self.records[i].clone())
    }

    /// Stores `record` under a fresh id. Any id the caller supplied is ignored.
    pub fn insert(&mut self, mut record: Record) -> Record {
        record.id = Some(RecordId::new(Uuid::new_v4().simple().to_string()));
        self.records.push(record.clone());
        record
    }

    pub fn update(&mut self, id: &RecordId, patch: RecordPatch) -> Option<Record> {
        let index = self.position_of(id)?;
        let record = &mut self.records[index];
        record.merge(patch);
        Some(record.clone())
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<Record> {
        let index = self.position_of(id)?;
        Some(self.records.remove(index))
    }

    fn position_of(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id.as_ref() == Some(id))
    }
}
