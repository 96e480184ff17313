//! Keeps the unlock ledger in step with entitlement revocations pushed by the
//! purchase provider.

use std::collections::BTreeSet;
use std::sync::Arc;

use kc_core::ports::PurchaseCatalogPort;
use kc_core::{CollectionId, ProductId, UnlockLedger};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Outcome of reconciling one removal batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Removed from the ledger; a refresh signal went out for each.
    pub locked: Vec<CollectionId>,
    /// Not in the ledger; nothing to do.
    pub skipped: Vec<CollectionId>,
    /// The lock could not be persisted.
    pub failed: Vec<(CollectionId, String)>,
}

/// Long-lived listener for "entitlement removed" batches.
///
/// ## Behavior / 行为
/// - Each qualified product id is stripped of the bundle namespace and
///   locked in the ledger; the ledger emits the refresh signal
/// - Ids not in the ledger are skipped; reprocessing a batch is harmless
/// - A failed write is logged and the rest of the batch still runs
/// - Runs regardless of whether any UI is showing the affected collection,
///   until the catalog's stream closes
pub struct ReconciliationListener {
    ledger: Arc<UnlockLedger>,
    catalog: Arc<dyn PurchaseCatalogPort>,
}

impl ReconciliationListener {
    pub fn new(ledger: Arc<UnlockLedger>, catalog: Arc<dyn PurchaseCatalogPort>) -> Self {
        Self { ledger, catalog }
    }

    /// Subscribe now and process batches on a background task.
    ///
    /// The subscription is taken before this returns, so any batch sent
    /// afterwards is seen.
    pub fn spawn(self) -> JoinHandle<()> {
        let removed_rx = self.catalog.subscribe_removed();
        tokio::spawn(self.run(removed_rx))
    }

    /// Run the listener loop until the catalog ends the stream.
    ///
    /// Batches queue up while one is being reconciled; none are dropped.
    pub async fn run(self, mut removed_rx: mpsc::UnboundedReceiver<BTreeSet<String>>) {
        info!("Entitlement reconciliation listener started");
        while let Some(batch) = removed_rx.recv().await {
            let span = info_span!("usecase.reconcile_entitlements", batch_size = batch.len());
            let report = self.reconcile(&batch).instrument(span).await;
            if !report.failed.is_empty() {
                warn!(
                    failed = report.failed.len(),
                    locked = report.locked.len(),
                    "Reconciliation finished with failures"
                );
            }
        }
        info!("Entitlement removal stream closed; listener stopping");
    }

    /// Apply one batch of fully-qualified removed product identifiers.
    pub async fn reconcile(&self, removed: &BTreeSet<String>) -> ReconcileReport {
        let namespace = self.catalog.bundle_namespace();
        let mut report = ReconcileReport::default();

        for raw in removed {
            let id = ProductId::from(raw.as_str()).collection_id(&namespace);
            match self.ledger.lock(&id).await {
                Ok(true) => {
                    info!(collection = %id, product = %raw, "Entitlement revoked; collection locked");
                    report.locked.push(id);
                }
                Ok(false) => {
                    debug!(collection = %id, "Revoked collection was not unlocked");
                    report.skipped.push(id);
                }
                Err(err) => {
                    error!(collection = %id, error = %err, "Failed to lock revoked collection");
                    report.failed.push((id, err.to_string()));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_ledger, FakeCatalog};
    use async_trait::async_trait;
    use kc_core::ports::UnlockStorePort;
    use kc_infra::InMemoryUnlockStore;
    use std::time::Duration;
    use tokio::sync::broadcast::error::TryRecvError;

    fn batch(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_removal_locks_and_signals_once() {
        let ledger = memory_ledger();
        let id = CollectionId::from("filmA");
        ledger.unlock(&id).await.unwrap();
        let mut rx = ledger.subscribe();
        let listener = ReconciliationListener::new(ledger.clone(), Arc::new(FakeCatalog::new()));

        let report = listener.reconcile(&batch(&["com.kontax.cam.filmA"])).await;

        assert_eq!(report.locked, vec![id.clone()]);
        assert!(!ledger.is_unlocked(&id).await);
        let signal = rx.try_recv().unwrap();
        assert_eq!(signal.collection, id);
        assert!(!signal.unlocked);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_removal_of_never_unlocked_is_noop() {
        let ledger = memory_ledger();
        ledger.unlock(&CollectionId::from("kg")).await.unwrap();
        let mut rx = ledger.subscribe();
        let listener = ReconciliationListener::new(ledger.clone(), Arc::new(FakeCatalog::new()));

        let report = listener.reconcile(&batch(&["com.kontax.cam.filmA"])).await;

        assert!(report.locked.is_empty());
        assert_eq!(report.skipped, vec![CollectionId::from("filmA")]);
        assert_eq!(ledger.all().await.unwrap().len(), 1);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_reprocessing_same_batch_is_idempotent() {
        let ledger = memory_ledger();
        ledger.unlock(&CollectionId::from("filmA")).await.unwrap();
        let listener = ReconciliationListener::new(ledger.clone(), Arc::new(FakeCatalog::new()));
        let removed = batch(&["com.kontax.cam.filmA"]);

        listener.reconcile(&removed).await;
        let second = listener.reconcile(&removed).await;

        assert!(second.locked.is_empty());
        assert!(ledger.all().await.unwrap().is_empty());
    }

    /// Refuses any write that would drop `filmA`.
    struct PinnedFilmAStore {
        inner: InMemoryUnlockStore,
    }

    #[async_trait]
    impl UnlockStorePort for PinnedFilmAStore {
        async fn load_list(&self, key: &str) -> anyhow::Result<Option<Vec<String>>> {
            self.inner.load_list(key).await
        }

        async fn save_list(&self, key: &str, values: &[String]) -> anyhow::Result<()> {
            let previous = self.inner.load_list(key).await?.unwrap_or_default();
            let drops_film_a = previous.iter().any(|v| v == "filmA")
                && !values.iter().any(|v| v == "filmA");
            if drops_film_a {
                return Err(anyhow::anyhow!("read-only volume"));
            }
            self.inner.save_list(key, values).await
        }
    }

    #[tokio::test]
    async fn test_write_failure_does_not_abort_batch() {
        let ledger = Arc::new(UnlockLedger::new(Arc::new(PinnedFilmAStore {
            inner: InMemoryUnlockStore::new(),
        })));
        ledger.unlock(&CollectionId::from("filmA")).await.unwrap();
        ledger.unlock(&CollectionId::from("filmB")).await.unwrap();
        let listener = ReconciliationListener::new(ledger.clone(), Arc::new(FakeCatalog::new()));

        let report = listener
            .reconcile(&batch(&["com.kontax.cam.filmA", "com.kontax.cam.filmB"]))
            .await;

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, CollectionId::from("filmA"));
        assert_eq!(report.locked, vec![CollectionId::from("filmB")]);
        assert!(ledger.is_unlocked(&CollectionId::from("filmA")).await);
        assert!(!ledger.is_unlocked(&CollectionId::from("filmB")).await);
    }

    #[tokio::test]
    async fn test_burst_of_removals_locks_every_collection() {
        let ledger = memory_ledger();
        let ids: Vec<CollectionId> = (0..40)
            .map(|n| CollectionId::from(format!("film{n}")))
            .collect();
        for id in &ids {
            ledger.unlock(id).await.unwrap();
        }
        let catalog = Arc::new(FakeCatalog::new());
        let handle = ReconciliationListener::new(ledger.clone(), catalog.clone()).spawn();

        for id in &ids {
            catalog.push_removed(&[&format!("com.kontax.cam.{id}")]);
        }
        catalog.close_removed();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(ledger.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spawned_listener_processes_batches_until_closed() {
        let ledger = memory_ledger();
        ledger.unlock(&CollectionId::from("filmA")).await.unwrap();
        ledger.unlock(&CollectionId::from("kg")).await.unwrap();
        let mut rx = ledger.subscribe();
        let catalog = Arc::new(FakeCatalog::new());
        let handle = ReconciliationListener::new(ledger.clone(), catalog.clone()).spawn();

        catalog.push_removed(&["com.kontax.cam.filmA"]);
        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.collection, CollectionId::from("filmA"));

        catalog.push_removed(&["com.kontax.cam.kg"]);
        let second = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.collection, CollectionId::from("kg"));

        catalog.close_removed();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(ledger.all().await.unwrap().is_empty());
    }
}
