use async_trait::async_trait;

use crate::{
    errors::StoreError,
    model::{ListOptions, Record},
};

/// Ordered key-value store consumed by the service.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the record stored under exactly `key`, or [`StoreError::NotFound`].
    async fn read(&self, key: &str) -> Result<Record, StoreError>;

    /// Writes `record`, replacing any previous value under its key.
    async fn write(&self, record: Record) -> Result<(), StoreError>;

    /// Writes `record` only if its key is vacant. Fails with
    /// [`StoreError::AlreadyExists`] otherwise; the check and the insert are
    /// atomic with respect to every other mutation on the store.
    async fn create(&self, record: Record) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Returns records in key order.
    async fn list(&self, opts: ListOptions) -> Result<Vec<Record>, StoreError>;

    fn backend(&self) -> &'static str;
}
