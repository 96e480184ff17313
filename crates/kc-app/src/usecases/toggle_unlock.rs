//! Use cases for adding and removing ledger entries directly

use std::sync::Arc;

use kc_core::{CollectionId, LedgerError, UnlockLedger};
use tracing::info;

/// Marks a collection as unlocked.
///
/// Idempotent; returns whether the ledger changed.
pub struct UnlockCollection {
    ledger: Arc<UnlockLedger>,
}

impl UnlockCollection {
    pub fn new(ledger: Arc<UnlockLedger>) -> Self {
        Self { ledger }
    }

    #[tracing::instrument(name = "usecase.unlock_collection.execute", skip(self), fields(collection = %id))]
    pub async fn execute(&self, id: &CollectionId) -> Result<bool, LedgerError> {
        let changed = self.ledger.unlock(id).await?;
        info!(changed, "Unlock requested");
        Ok(changed)
    }
}

/// Removes a collection from the ledger.
///
/// Idempotent; returns whether the ledger changed.
pub struct LockCollection {
    ledger: Arc<UnlockLedger>,
}

impl LockCollection {
    pub fn new(ledger: Arc<UnlockLedger>) -> Self {
        Self { ledger }
    }

    #[tracing::instrument(name = "usecase.lock_collection.execute", skip(self), fields(collection = %id))]
    pub async fn execute(&self, id: &CollectionId) -> Result<bool, LedgerError> {
        let changed = self.ledger.lock(id).await?;
        info!(changed, "Lock requested");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_ledger;

    #[tokio::test]
    async fn test_unlock_and_lock_round() {
        let ledger = memory_ledger();
        let unlock = UnlockCollection::new(ledger.clone());
        let lock = LockCollection::new(ledger.clone());
        let id = CollectionId::from("filmA");

        assert!(unlock.execute(&id).await.unwrap());
        assert!(!unlock.execute(&id).await.unwrap());
        assert!(ledger.is_unlocked(&id).await);

        assert!(lock.execute(&id).await.unwrap());
        assert!(!lock.execute(&id).await.unwrap());
        assert!(!ledger.is_unlocked(&id).await);
    }
}
