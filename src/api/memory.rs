use crate::api::ResourceApi;
use crate::error::ApiError;
use crate::record::{Record, RecordId};

/// In-memory resource collection with auto-assigned identifiers.
/// Writes touching an unknown identifier resolve to an id-less payload
/// rather than an error, the write-failure shape the coordinator
/// watches for.
pub struct MemoryApi {
    records: Vec<Record>,
    next_id: RecordId,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|record| record.id)
            .max()
            .map(|max| max + 1)
            .unwrap_or(1);
        Self { records, next_id }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn find_index(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == Some(id))
    }
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceApi for MemoryApi {
    fn list(&self) -> Result<Vec<Record>, ApiError> {
        Ok(self.records.clone())
    }

    fn create(&mut self, data: &Record) -> Result<Record, ApiError> {
        let mut record = data.clone();
        record.id = Some(self.next_id);
        self.next_id += 1;
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: RecordId, data: &Record) -> Result<Record, ApiError> {
        let Some(index) = self.find_index(id) else {
            return Ok(Record::new());
        };
        let mut record = data.clone();
        record.id = Some(id);
        self.records[index] = record.clone();
        Ok(record)
    }

    fn delete(&mut self, id: RecordId) -> Result<Record, ApiError> {
        let Some(index) = self.find_index(id) else {
            return Ok(Record::new());
        };
        self.records.remove(index);
        Ok(Record::with_id(id))
    }
}
