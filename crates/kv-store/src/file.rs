use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    api::KvStore,
    errors::StoreError,
    memory::Table,
    model::{ListOptions, Record},
};

/// Store backed by a JSON snapshot on disk.
///
/// The whole table lives in memory; every mutation writes the snapshot to a
/// sibling `.partial` file, syncs it and renames it over the original, so a
/// crash leaves either the old or the new snapshot in place. A mutation whose snapshot cannot be written is
/// not applied.
pub struct FileKvStore {
    path: PathBuf,
    table: Mutex<Table>,
}

impl FileKvStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let table = if path.exists() {
            let raw = fs::read(&path)?;
            let records: Vec<Record> = if raw.is_empty() {
                Vec::new()
            } else {
                serde_json::from_slice(&raw)?
            };
            debug!(path = %path.display(), records = records.len(), "loaded store snapshot");
            Table::from_records(records)
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Table::default()
        };
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut Table) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.table.lock();
        let mut next = Table::from_records(guard.records().cloned());
        let out = apply(&mut next)?;
        if let Err(err) = persist(&self.path, &next) {
            warn!(path = %self.path.display(), %err, "failed to persist store snapshot");
            return Err(err);
        }
        *guard = next;
        Ok(out)
    }
}

/// Sibling of `path` used while a snapshot is being written.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

fn persist(path: &Path, table: &Table) -> Result<(), StoreError> {
    let records: Vec<&Record> = table.records().collect();
    let bytes = serde_json::to_vec_pretty(&records)?;
    let temp = temp_path(path);
    let mut file = fs::File::create(&temp)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    fs::rename(&temp, path)?;
    Ok(())
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn read(&self, key: &str) -> Result<Record, StoreError> {
        self.table.lock().get(key)
    }

    async fn write(&self, record: Record) -> Result<(), StoreError> {
        self.mutate(|table| {
            table.put(record);
            Ok(())
        })
    }

    async fn create(&self, record: Record) -> Result<(), StoreError> {
        self.mutate(|table| table.put_if_absent(record))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.table.lock().get(key).is_err() {
            return Ok(());
        }
        self.mutate(|table| {
            table.remove(key);
            Ok(())
        })
    }

    async fn list(&self, opts: ListOptions) -> Result<Vec<Record>, StoreError> {
        Ok(self.table.lock().scan(&opts))
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
