//! Storage seam for employee records.
//!
//! `RecordStore` is the only thing the accessor talks to; `dynamo` backs it
//! with the managed table and `memory` with a process-local map for tests
//! and local runs.

use async_trait::async_trait;
use models::Record;

use crate::errors::StoreError;

pub mod dynamo;
pub mod memory;

pub use dynamo::DynamoRecordStore;
pub use memory::InMemoryRecordStore;

/// Read consistency requested from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    Eventual,
    Strong,
}

impl Consistency {
    pub fn is_strong(self) -> bool {
        matches!(self, Consistency::Strong)
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    fn table_name(&self) -> &str;

    /// Fetch a record by its key; `Ok(None)` when no such record exists.
    async fn get_record(&self, name: &str, consistency: Consistency) -> Result<Option<Record>, StoreError>;

    /// Set `attr` to `value` on an existing record, only if `attr` is absent
    /// or holds the empty string at write time. Returns the record as it is
    /// after the write.
    async fn update_if_blank(&self, name: &str, attr: &str, value: &str) -> Result<Record, StoreError>;
}
