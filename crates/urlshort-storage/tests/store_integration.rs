use urlshort_core::Mapping;
use urlshort_storage::{StorageError, StoreConfig, UrlStore};

fn seed() -> Mapping {
    [
        ("/bolt", "https://github.com/boltdb/bolt"),
        ("/bolt-buckets", "https://github.com/boltdb/bolt#using-buckets"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn bootstrap_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::builder().path(dir.path().join("url.db")).build();

    let store = UrlStore::bootstrap(&config, &seed()).unwrap();

    assert_eq!(
        store.get("/bolt").unwrap().as_deref(),
        Some("https://github.com/boltdb/bolt")
    );
    assert_eq!(
        store.get("/bolt-buckets").unwrap().as_deref(),
        Some("https://github.com/boltdb/bolt#using-buckets")
    );
    assert!(store.get("/missing").unwrap().is_none());
}

#[test]
fn entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::builder().path(dir.path().join("url.db")).build();

    let store = UrlStore::bootstrap(&config, &seed()).unwrap();
    store.close().unwrap();

    let reopened = UrlStore::open(&config).unwrap();
    assert_eq!(
        reopened.get("/bolt").unwrap().as_deref(),
        Some("https://github.com/boltdb/bolt")
    );
}

#[test]
fn second_open_is_rejected_while_held() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::builder().path(dir.path().join("url.db")).build();

    let store = UrlStore::bootstrap(&config, &seed()).unwrap();
    let held = store.clone();

    let err = UrlStore::open(&config).unwrap_err();
    assert!(matches!(err, StorageError::Open(_)), "{err:?}");

    // every clone keeps the lock
    store.close().unwrap();
    assert!(matches!(UrlStore::open(&config), Err(StorageError::Open(_))));

    drop(held);
    let reopened = UrlStore::open(&config).unwrap();
    assert_eq!(
        reopened.get("/bolt").unwrap().as_deref(),
        Some("https://github.com/boltdb/bolt")
    );
}

#[test]
fn clones_share_the_keyspace() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::builder().path(dir.path().join("url.db")).build();

    let store = UrlStore::open(&config).unwrap();
    let reader = store.clone();
    assert!(reader.get("/bolt").unwrap().is_none());

    store.seed(&seed()).unwrap();
    assert!(reader.get("/bolt").unwrap().is_some());
}
