use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use models::{AttrValue, Record};

use super::{Consistency, RecordStore};
use crate::errors::StoreError;

/// Process-local record store with the same guard semantics as the managed
/// table. Failures can be queued per operation to exercise error paths.
#[derive(Default)]
pub struct InMemoryRecordStore {
    table_name: String,
    records: Mutex<HashMap<String, Record>>,
    get_failures: Mutex<VecDeque<StoreError>>,
    update_failures: Mutex<VecDeque<StoreError>>,
    get_consistencies: Mutex<Vec<Consistency>>,
    get_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self { table_name: table_name.into(), ..Default::default() }
    }

    /// Insert or replace a record under its `Name` key.
    pub fn insert(&self, record: Record) {
        let Some(name) = record.name().map(str::to_string) else { return };
        self.records.lock().unwrap_or_else(|e| e.into_inner()).insert(name, record);
    }

    pub fn record(&self, name: &str) -> Option<Record> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).get(name).cloned()
    }

    /// The next `get_record` call fails with `err` (queued in order).
    pub fn fail_next_get(&self, err: StoreError) {
        self.get_failures.lock().unwrap_or_else(|e| e.into_inner()).push_back(err);
    }

    /// The next `update_if_blank` call fails with `err` (queued in order).
    pub fn fail_next_update(&self, err: StoreError) {
        self.update_failures.lock().unwrap_or_else(|e| e.into_inner()).push_back(err);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Consistency requested by each `get_record` call, in call order.
    pub fn get_consistencies(&self) -> Vec<Consistency> {
        self.get_consistencies.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_record(&self, name: &str, consistency: Consistency) -> Result<Option<Record>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.get_consistencies.lock().unwrap_or_else(|e| e.into_inner()).push(consistency);
        if let Some(err) = self.get_failures.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            return Err(err);
        }
        Ok(self.record(name))
    }

    async fn update_if_blank(&self, name: &str, attr: &str, value: &str) -> Result<Record, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.update_failures.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            return Err(err);
        }

        // check and write under one lock, mirroring the server-side guard
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        let record = records
            .get_mut(name)
            .ok_or(StoreError::ConditionFailed { record_exists: false })?;
        let writable = match record.get(attr) {
            None => true,
            Some(AttrValue::Text(s)) => s.is_empty(),
            Some(_) => false,
        };
        if !writable {
            return Err(StoreError::ConditionFailed { record_exists: true });
        }
        record.set(attr, AttrValue::text(value));
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new("employees");
        store.insert(
            Record::new("alice")
                .with("phone", AttrValue::text(""))
                .with("desk", AttrValue::text("  "))
                .with("email", AttrValue::text("a@b.com")),
        );
        store
    }

    #[tokio::test]
    async fn get_missing_record_is_none() -> Result<(), StoreError> {
        let store = seeded();
        assert!(store.get_record("nobody", Consistency::Eventual).await?.is_none());
        assert_eq!(store.get_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_fills_empty_and_absent_fields() -> Result<(), StoreError> {
        let store = seeded();
        let after = store.update_if_blank("alice", "phone", "555-1234").await?;
        assert_eq!(after.get("phone"), Some(&AttrValue::text("555-1234")));

        let after = store.update_if_blank("alice", "manager", "bob").await?;
        assert_eq!(after.get("manager"), Some(&AttrValue::text("bob")));
        assert_eq!(store.update_calls(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_filled_or_whitespace_fields() {
        let store = seeded();
        let err = store.update_if_blank("alice", "email", "x@y.com").await.unwrap_err();
        assert_eq!(err, StoreError::ConditionFailed { record_exists: true });

        // the guard compares against the exact empty string
        let err = store.update_if_blank("alice", "desk", "4F").await.unwrap_err();
        assert_eq!(err, StoreError::ConditionFailed { record_exists: true });
    }

    #[tokio::test]
    async fn update_never_creates_records() {
        let store = seeded();
        let err = store.update_if_blank("nobody", "phone", "1").await.unwrap_err();
        assert_eq!(err, StoreError::ConditionFailed { record_exists: false });
        assert!(store.record("nobody").is_none());
    }

    #[tokio::test]
    async fn queued_failures_fire_once_in_order() -> Result<(), StoreError> {
        let store = seeded();
        store.fail_next_get(StoreError::Throttled("slow down".into()));
        store.fail_next_get(StoreError::TableNotFound("employees".into()));

        assert!(matches!(store.get_record("alice", Consistency::Strong).await, Err(StoreError::Throttled(_))));
        assert!(matches!(store.get_record("alice", Consistency::Strong).await, Err(StoreError::TableNotFound(_))));
        assert!(store.get_record("alice", Consistency::Strong).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn reads_remember_requested_consistency() -> Result<(), StoreError> {
        let store = seeded();
        store.fail_next_get(StoreError::Throttled("slow down".into()));
        let _ = store.get_record("alice", Consistency::Eventual).await;
        store.get_record("alice", Consistency::Strong).await?;
        assert_eq!(store.get_consistencies(), vec![Consistency::Eventual, Consistency::Strong]);
        Ok(())
    }
}
