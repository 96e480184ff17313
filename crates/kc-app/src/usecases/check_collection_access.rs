//! Use case for deciding whether a collection can be used

use std::sync::Arc;

use kc_core::ports::PurchaseCatalogPort;
use kc_core::{AccessState, FilterCollection, UnlockLedger};
use tracing::{debug, info_span, Instrument};

/// Use case for checking a collection's access state.
///
/// ## Behavior / 行为
/// - A collection the catalog does not sell is `Free`
/// - Otherwise the unlock ledger decides between `Unlocked` and `Locked`,
///   keyed by the product's identifier
pub struct CheckCollectionAccess {
    ledger: Arc<UnlockLedger>,
    catalog: Arc<dyn PurchaseCatalogPort>,
}

impl CheckCollectionAccess {
    pub fn new(ledger: Arc<UnlockLedger>, catalog: Arc<dyn PurchaseCatalogPort>) -> Self {
        Self { ledger, catalog }
    }

    pub async fn execute(&self, collection: &FilterCollection) -> AccessState {
        let span = info_span!(
            "usecase.check_collection_access.execute",
            collection = %collection.id
        );

        async {
            let descriptor = self.catalog.lookup(&collection.name).await;
            let in_ledger = match &descriptor {
                Some(descriptor) => self.ledger.is_unlocked(&descriptor.identifier).await,
                None => false,
            };
            let state = AccessState::resolve(descriptor, in_ledger);
            debug!(?state, "Resolved collection access");
            state
        }
        .instrument(span)
        .await
    }
}
