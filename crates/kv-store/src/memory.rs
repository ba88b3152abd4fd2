use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    api::KvStore,
    errors::StoreError,
    model::{ListOptions, Record},
};

/// Key-ordered record table shared by the memory and file stores.
#[derive(Debug, Default)]
pub(crate) struct Table {
    records: BTreeMap<String, Record>,
}

impl Table {
    pub(crate) fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.key.clone(), record))
                .collect(),
        }
    }

    pub(crate) fn get(&self, key: &str) -> Result<Record, StoreError> {
        self.records.get(key).cloned().ok_or(StoreError::NotFound)
    }

    pub(crate) fn put(&mut self, record: Record) {
        self.records.insert(record.key.clone(), record);
    }

    pub(crate) fn put_if_absent(&mut self, record: Record) -> Result<(), StoreError> {
        if self.records.contains_key(&record.key) {
            return Err(StoreError::AlreadyExists(record.key));
        }
        self.put(record);
        Ok(())
    }

    /// Missing keys are not an error.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        self.records.remove(key).is_some()
    }

    pub(crate) fn scan(&self, opts: &ListOptions) -> Vec<Record> {
        let prefix = opts.prefix.as_deref().unwrap_or("");
        self.records
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, record)| record.clone())
            .collect()
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

/// Process-local store. Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn read(&self, key: &str) -> Result<Record, StoreError> {
        self.table.read().get(key)
    }

    async fn write(&self, record: Record) -> Result<(), StoreError> {
        self.table.write().put(record);
        Ok(())
    }

    async fn create(&self, record: Record) -> Result<(), StoreError> {
        self.table.write().put_if_absent(record)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.table.write().remove(key);
        Ok(())
    }

    async fn list(&self, opts: ListOptions) -> Result<Vec<Record>, StoreError> {
        Ok(self.table.read().scan(&opts))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
