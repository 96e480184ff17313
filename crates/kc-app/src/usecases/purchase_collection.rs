//! Use case for buying a filter collection

use std::sync::Arc;

use kc_core::ports::PurchaseCatalogPort;
use kc_core::purchase::{PurchaseDetails, PurchaseFailure};
use kc_core::{CollectionId, CollectionRegistry, UnlockLedger};
use tracing::{error, info, info_span, Instrument};

const GENERIC_PURCHASE_PROBLEM: &str =
    "Looks like there was a problem purchasing this collection. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum PurchaseCollectionError {
    #[error("unknown collection: {0}")]
    UnknownCollection(CollectionId),

    #[error("no purchasable product for collection \"{0}\"")]
    NoProductForCollection(String),

    #[error("purchase cancelled by user")]
    PurchaseCancelled,

    #[error("purchase failed: {0}")]
    PurchaseFailed(String),

    #[error("purchase completed but unlock could not be saved: {0}")]
    PersistenceWriteFailed(String),
}

impl PurchaseCollectionError {
    /// Text to show the user, or `None` when nothing should be shown.
    pub fn user_message(&self) -> Option<String> {
        match self {
            PurchaseCollectionError::UnknownCollection(_)
            | PurchaseCollectionError::NoProductForCollection(_) => {
                Some(GENERIC_PURCHASE_PROBLEM.to_string())
            }
            PurchaseCollectionError::PurchaseCancelled => None,
            PurchaseCollectionError::PurchaseFailed(reason) => Some(reason.clone()),
            PurchaseCollectionError::PersistenceWriteFailed(_) => Some(
                "Your purchase went through but could not be saved on this device.".to_string(),
            ),
        }
    }
}

impl From<PurchaseFailure> for PurchaseCollectionError {
    fn from(failure: PurchaseFailure) -> Self {
        match failure {
            PurchaseFailure::Cancelled => PurchaseCollectionError::PurchaseCancelled,
            PurchaseFailure::Failed(reason) => PurchaseCollectionError::PurchaseFailed(reason),
        }
    }
}

/// Use case for purchasing a collection and unlocking it.
///
/// ## Behavior / 行为
/// 1. Resolve the collection, then its product by collection name; a miss
///    fails with `NoProductForCollection` and touches nothing
/// 2. Ask the catalog to purchase the product
/// 3. On success, unlock the product's identifier (the ledger signals
///    observers) and return the receipt
/// 4. On failure, map the reason; the ledger is never touched
pub struct PurchaseCollection {
    ledger: Arc<UnlockLedger>,
    catalog: Arc<dyn PurchaseCatalogPort>,
    collections: Arc<CollectionRegistry>,
}

impl PurchaseCollection {
    pub fn new(
        ledger: Arc<UnlockLedger>,
        catalog: Arc<dyn PurchaseCatalogPort>,
        collections: Arc<CollectionRegistry>,
    ) -> Self {
        Self {
            ledger,
            catalog,
            collections,
        }
    }

    pub async fn execute(
        &self,
        id: &CollectionId,
    ) -> Result<PurchaseDetails, PurchaseCollectionError> {
        let span = info_span!("usecase.purchase_collection.execute", collection = %id);

        async {
            let collection = self
                .collections
                .get(id)
                .ok_or_else(|| PurchaseCollectionError::UnknownCollection(id.clone()))?;

            let descriptor = self
                .catalog
                .lookup(&collection.name)
                .await
                .ok_or_else(|| {
                    PurchaseCollectionError::NoProductForCollection(collection.name.clone())
                })?;

            info!(price = %descriptor.display_price, "Starting purchase");

            let details = match self.catalog.purchase(&descriptor.identifier).await {
                Ok(details) => details,
                Err(PurchaseFailure::Cancelled) => {
                    info!("Purchase cancelled by user");
                    return Err(PurchaseCollectionError::PurchaseCancelled);
                }
                Err(failure) => {
                    error!(error = %failure, "Purchase failed");
                    return Err(failure.into());
                }
            };

            self.ledger
                .unlock(&descriptor.identifier)
                .await
                .map_err(|err| {
                    error!(error = %err, "Purchase succeeded but unlock was not persisted");
                    PurchaseCollectionError::PersistenceWriteFailed(err.to_string())
                })?;

            info!(product = %details.product_id, "Purchase completed");
            Ok(details)
        }
        .instrument(span)
        .await
    }
}
