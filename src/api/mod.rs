pub mod http;
pub mod memory;

use crate::error::ApiError;
use crate::record::{Record, RecordId};

/// The remote resource collection.
///
/// Transport and encoding are the implementor's concern. The core only
/// relies on one wire convention: a successful write returns a payload
/// carrying the record's identifier, a failed one returns a payload
/// without it.
pub trait ResourceApi {
    fn list(&self) -> Result<Vec<Record>, ApiError>;
    fn create(&mut self, data: &Record) -> Result<Record, ApiError>;
    fn update(&mut self, id: RecordId, data: &Record) -> Result<Record, ApiError>;
    fn delete(&mut self, id: RecordId) -> Result<Record, ApiError>;
}
