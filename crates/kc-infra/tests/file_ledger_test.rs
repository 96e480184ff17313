//! Unlock ledger over the JSON file store.

use std::sync::Arc;

use kc_core::{CollectionId, UnlockLedger};
use kc_infra::FileUnlockStore;
use tempfile::TempDir;

#[tokio::test]
async fn test_unlocks_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_defaults.json");

    {
        let ledger = UnlockLedger::new(Arc::new(FileUnlockStore::new(&path)));
        ledger.unlock(&CollectionId::from("filmA")).await.unwrap();
        ledger.unlock(&CollectionId::from("kg")).await.unwrap();
        ledger.lock(&CollectionId::from("kg")).await.unwrap();
    }

    let reopened = UnlockLedger::new(Arc::new(FileUnlockStore::new(&path)));
    assert!(reopened.is_unlocked(&CollectionId::from("filmA")).await);
    assert!(!reopened.is_unlocked(&CollectionId::from("kg")).await);
}

#[tokio::test]
async fn test_file_layout_uses_purchased_filters_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("user_defaults.json");
    let ledger = UnlockLedger::new(Arc::new(FileUnlockStore::new(&path)));

    ledger.unlock(&CollectionId::from("filmA")).await.unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["purchasedFilters"], serde_json::json!(["filmA"]));
}

#[tokio::test]
async fn test_fresh_install_reads_locked() {
    let dir = TempDir::new().unwrap();
    let ledger = UnlockLedger::new(Arc::new(FileUnlockStore::new(
        dir.path().join("user_defaults.json"),
    )));

    assert!(!ledger.is_unlocked(&CollectionId::from("filmA")).await);
    assert!(ledger.all().await.unwrap().is_empty());
}
