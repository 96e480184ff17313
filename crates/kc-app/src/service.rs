//! UI-facing surface over the unlock use cases.

use std::sync::Arc;

use kc_core::purchase::PurchaseDetails;
use kc_core::{
    AccessState, CollectionId, FilterCollection, LedgerError, UnlockLedger, UnlockStateChanged,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::deps::AppDeps;
use crate::usecases::{
    CheckCollectionAccess, ListUnlockedCollections, LockCollection, OfferError,
    PrepareCollectionOffer, PurchaseCollection, PurchaseCollectionError, ReconciliationListener,
    UnlockCollection,
};

/// Everything a screen needs to show and change unlock state.
///
/// Built once from [`AppDeps`] and shared; screens subscribe to
/// [`UnlockService::on_unlock_state_changed`] to refresh.
pub struct UnlockService {
    deps: AppDeps,
}

impl UnlockService {
    pub fn new(deps: AppDeps) -> Self {
        Self { deps }
    }

    pub fn ledger(&self) -> &Arc<UnlockLedger> {
        &self.deps.ledger
    }

    pub fn collections(&self) -> impl Iterator<Item = &FilterCollection> {
        self.deps.collections.iter()
    }

    pub fn collection(&self, id: &CollectionId) -> Option<&FilterCollection> {
        self.deps.collections.get(id)
    }

    pub async fn is_unlocked(&self, id: &CollectionId) -> bool {
        self.deps.ledger.is_unlocked(id).await
    }

    pub async fn unlock(&self, id: &CollectionId) -> Result<bool, LedgerError> {
        UnlockCollection::new(self.deps.ledger.clone())
            .execute(id)
            .await
    }

    pub async fn lock(&self, id: &CollectionId) -> Result<bool, LedgerError> {
        LockCollection::new(self.deps.ledger.clone()).execute(id).await
    }

    pub async fn unlocked_collections(&self) -> Result<Vec<CollectionId>, LedgerError> {
        ListUnlockedCollections::new(self.deps.ledger.clone())
            .execute()
            .await
    }

    pub async fn access(&self, collection: &FilterCollection) -> AccessState {
        self.check_access().execute(collection).await
    }

    pub async fn prepare_offer(
        &self,
        collection: &FilterCollection,
    ) -> Result<AccessState, OfferError> {
        PrepareCollectionOffer::new(self.check_access(), self.deps.reachability.clone())
            .execute(collection)
            .await
    }

    pub async fn purchase(
        &self,
        id: &CollectionId,
    ) -> Result<PurchaseDetails, PurchaseCollectionError> {
        PurchaseCollection::new(
            self.deps.ledger.clone(),
            self.deps.catalog.clone(),
            self.deps.collections.clone(),
        )
        .execute(id)
        .await
    }

    /// Refresh signal for screens showing unlock state.
    pub fn on_unlock_state_changed(&self) -> broadcast::Receiver<UnlockStateChanged> {
        self.deps.ledger.subscribe()
    }

    /// Start the background revocation listener.
    pub fn start_reconciliation(&self) -> JoinHandle<()> {
        ReconciliationListener::new(self.deps.ledger.clone(), self.deps.catalog.clone()).spawn()
    }

    fn check_access(&self) -> CheckCollectionAccess {
        CheckCollectionAccess::new(self.deps.ledger.clone(), self.deps.catalog.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{collection, memory_ledger, FakeCatalog, FixedReachability};
    use kc_core::CollectionRegistry;
    use std::time::Duration;

    fn service(catalog: Arc<FakeCatalog>) -> UnlockService {
        UnlockService::new(AppDeps {
            ledger: memory_ledger(),
            catalog,
            reachability: Arc::new(FixedReachability(true)),
            collections: Arc::new(CollectionRegistry::new(vec![
                collection("a", "A Collection"),
                collection("filmA", "Film A"),
            ])),
        })
    }

    #[tokio::test]
    async fn test_purchase_then_revocation_round_trip() {
        let catalog = Arc::new(FakeCatalog::new().with_product("filmA", "Film A", "$1.99"));
        let service = service(catalog.clone());
        let id = CollectionId::from("filmA");
        let mut changes = service.on_unlock_state_changed();
        let listener = service.start_reconciliation();

        service.purchase(&id).await.unwrap();
        assert!(service.is_unlocked(&id).await);
        assert!(changes.recv().await.unwrap().unlocked);

        catalog.push_removed(&["com.kontax.cam.filmA"]);
        let revoked = tokio::time::timeout(Duration::from_secs(1), changes.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(revoked.collection, id);
        assert!(!revoked.unlocked);
        assert!(!service.is_unlocked(&id).await);

        catalog.close_removed();
        listener.await.unwrap();
    }

    #[tokio::test]
    async fn test_access_for_free_and_sold_collections() {
        let catalog = Arc::new(FakeCatalog::new().with_product("filmA", "Film A", "$1.99"));
        let service = service(catalog);
        let free = service.collection(&CollectionId::from("a")).cloned().unwrap();
        let sold = service
            .collection(&CollectionId::from("filmA"))
            .cloned()
            .unwrap();

        assert_eq!(service.access(&free).await, AccessState::Free);
        assert!(matches!(service.access(&sold).await, AccessState::Locked(_)));

        service.unlock(&sold.id).await.unwrap();
        assert_eq!(
            service.prepare_offer(&sold).await.unwrap(),
            AccessState::Unlocked
        );
        assert_eq!(
            service.unlocked_collections().await.unwrap(),
            vec![sold.id.clone()]
        );

        service.lock(&sold.id).await.unwrap();
        assert!(!service.is_unlocked(&sold.id).await);
    }
}
