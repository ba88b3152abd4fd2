use crate::file::temp_path;
use crate::{FileKvStore, InMemoryKvStore, KvStore, ListOptions, Record, StoreError};
use serde_json::json;

#[tokio::test]
async fn read_missing_key_is_not_found() {
    let store = InMemoryKvStore::new();
    let err = store.read("orgs.acme").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_refuses_occupied_key() {
    let store = InMemoryKvStore::new();
    store
        .create(Record::new("orgs.acme", b"first".to_vec()))
        .await
        .unwrap();

    let err = store
        .create(Record::new("orgs.acme", b"second".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(ref key) if key == "orgs.acme"));
    assert_eq!(store.read("orgs.acme").await.unwrap().value, b"first");
}

#[tokio::test]
async fn write_overwrites_and_delete_is_idempotent() {
    let store = InMemoryKvStore::new();
    store.write(Record::new("k", b"1".to_vec())).await.unwrap();
    store.write(Record::new("k", b"2".to_vec())).await.unwrap();
    assert_eq!(store.read("k").await.unwrap().value, b"2");

    store.delete("k").await.unwrap();
    store.delete("k").await.unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn list_scans_prefix_in_key_order() {
    let store = InMemoryKvStore::new();
    for key in ["orgs.zeta", "users.bob", "orgs.acme", "orgsx", "orgs.beta"] {
        store.write(Record::new(key, b"{}".to_vec())).await.unwrap();
    }

    let keys: Vec<String> = store
        .list(ListOptions::prefix("orgs."))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.key)
        .collect();
    assert_eq!(keys, vec!["orgs.acme", "orgs.beta", "orgs.zeta"]);

    assert_eq!(store.list(ListOptions::default()).await.unwrap().len(), 5);
}

#[test]
fn record_json_carries_base64_value_and_metadata() {
    let mut record = Record::new("orgs.acme", br#"{"created_at":"1"}"#.to_vec());
    record.metadata.insert("source".into(), json!("test"));
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["key"], "orgs.acme");
    assert_eq!(value["value"], "eyJjcmVhdGVkX2F0IjoiMSJ9");
    assert_eq!(value["metadata"]["source"], "test");

    let back: Record = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let store = FileKvStore::open(&path).unwrap();
        store
            .create(Record::new("orgs.acme", b"a".to_vec()))
            .await
            .unwrap();
        store
            .create(Record::new("orgs.beta", b"b".to_vec()))
            .await
            .unwrap();
        store.delete("orgs.beta").await.unwrap();
    }

    let reopened = FileKvStore::open(&path).unwrap();
    assert_eq!(reopened.backend(), "file");
    let records = reopened.list(ListOptions::prefix("orgs.")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "orgs.acme");
    assert_eq!(records[0].value, b"a");
    assert!(!temp_path(&path).exists());
}

#[tokio::test]
async fn file_store_create_conflict_leaves_snapshot_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = FileKvStore::open(&path).unwrap();
    store.create(Record::new("k", b"1".to_vec())).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    assert!(store.create(Record::new("k", b"2".to_vec())).await.is_err());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn file_store_failed_persist_is_not_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = FileKvStore::open(&path).unwrap();
    store.create(Record::new("k", b"1".to_vec())).await.unwrap();

    // A directory squatting on the temp name makes the snapshot write fail.
    std::fs::create_dir(temp_path(&path)).unwrap();
    let err = store
        .create(Record::new("orgs.acme", b"a".to_vec()))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(store.read("orgs.acme").await.unwrap_err().is_not_found());
    assert!(store.delete("k").await.is_err());
    assert_eq!(store.read("k").await.unwrap().value, b"1");

    std::fs::remove_dir(temp_path(&path)).unwrap();
    store
        .create(Record::new("orgs.acme", b"a".to_vec()))
        .await
        .unwrap();
    let reopened = FileKvStore::open(&path).unwrap();
    assert_eq!(reopened.list(ListOptions::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn file_store_accepts_paths_ending_in_tmp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orgs.tmp");
    let store = FileKvStore::open(&path).unwrap();
    store
        .create(Record::new("orgs.acme", b"a".to_vec()))
        .await
        .unwrap();
    assert!(!temp_path(&path).exists());

    let reopened = FileKvStore::open(&path).unwrap();
    assert_eq!(reopened.read("orgs.acme").await.unwrap().value, b"a");
}
