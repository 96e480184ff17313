use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::ids::CollectionId;
use crate::ports::UnlockStorePort;

use super::{LedgerError, UnlockStateChanged};

/// Store key holding the unlocked collection identifiers.
pub const PURCHASED_FILTERS_KEY: &str = "purchasedFilters";

const SIGNAL_CAPACITY: usize = 64;

/// Persisted set of unlocked collections.
///
/// ## Behavior / 行为
/// - Every query re-reads the store, so a read following a write in this
///   process always observes it.
/// - `unlock()` and `lock()` are idempotent and flush before returning.
/// - Read-modify-write cycles are serialized behind one owner lock, so a
///   purchase unlock and a revocation lock on the same id never interleave.
/// - A [`UnlockStateChanged`] is broadcast only when the set actually changed.
pub struct UnlockLedger {
    store: Arc<dyn UnlockStorePort>,
    owner: Mutex<()>,
    changes: broadcast::Sender<UnlockStateChanged>,
}

impl UnlockLedger {
    pub fn new(store: Arc<dyn UnlockStorePort>) -> Self {
        let (changes, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            store,
            owner: Mutex::new(()),
            changes,
        }
    }

    /// Subscribe to refresh signals. Signals sent before this call are missed.
    pub fn subscribe(&self) -> broadcast::Receiver<UnlockStateChanged> {
        self.changes.subscribe()
    }

    /// Whether `id` is in the ledger.
    ///
    /// A ledger that was never written reads as empty; a failing store reads
    /// as locked rather than surfacing an error.
    pub async fn is_unlocked(&self, id: &CollectionId) -> bool {
        let _owner = self.owner.lock().await;
        match self.read().await {
            Ok(set) => set.contains(id),
            Err(err) => {
                warn!(collection = %id, error = %err, "Unlock ledger unreadable; treating as locked");
                false
            }
        }
    }

    /// Snapshot of every unlocked collection.
    pub async fn all(&self) -> Result<BTreeSet<CollectionId>, LedgerError> {
        let _owner = self.owner.lock().await;
        self.read().await
    }

    /// Add `id`. Returns `true` if the ledger changed.
    pub async fn unlock(&self, id: &CollectionId) -> Result<bool, LedgerError> {
        self.apply(id, true).await
    }

    /// Remove `id`. Returns `true` if the ledger changed.
    pub async fn lock(&self, id: &CollectionId) -> Result<bool, LedgerError> {
        self.apply(id, false).await
    }

    async fn apply(&self, id: &CollectionId, unlocked: bool) -> Result<bool, LedgerError> {
        let _owner = self.owner.lock().await;

        let mut set = self.read().await?;
        let changed = if unlocked {
            set.insert(id.clone())
        } else {
            set.remove(id)
        };

        if !changed {
            debug!(collection = %id, unlocked, "Unlock ledger already up to date");
            return Ok(false);
        }

        self.write(&set).await?;
        info!(collection = %id, unlocked, total = set.len(), "Unlock ledger updated");

        // No subscribers is fine: nobody is displaying unlock state right now.
        let _ = self.changes.send(UnlockStateChanged {
            collection: id.clone(),
            unlocked,
        });
        Ok(true)
    }

    async fn read(&self) -> Result<BTreeSet<CollectionId>, LedgerError> {
        let values = self
            .store
            .load_list(PURCHASED_FILTERS_KEY)
            .await
            .map_err(|err| LedgerError::ReadFailed(format!("{err:#}")))?;

        Ok(values
            .unwrap_or_default()
            .into_iter()
            .map(CollectionId::from)
            .collect())
    }

    async fn write(&self, set: &BTreeSet<CollectionId>) -> Result<(), LedgerError> {
        let values: Vec<String> = set.iter().map(|id| id.as_str().to_string()).collect();
        self.store
            .save_list(PURCHASED_FILTERS_KEY, &values)
            .await
            .map_err(|err| LedgerError::PersistenceWriteFailed(format!("{err:#}")))
    }
}
