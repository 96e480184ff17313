use std::sync::Arc;

use kc_core::{CollectionId, LedgerError, UnlockLedger};

/// Lists unlocked collection ids in sorted order.
pub struct ListUnlockedCollections {
    ledger: Arc<UnlockLedger>,
}

impl ListUnlockedCollections {
    pub fn new(ledger: Arc<UnlockLedger>) -> Self {
        Self { ledger }
    }

    #[tracing::instrument(name = "usecase.list_unlocked_collections.execute", skip(self))]
    pub async fn execute(&self) -> Result<Vec<CollectionId>, LedgerError> {
        Ok(self.ledger.all().await?.into_iter().collect())
    }
}
