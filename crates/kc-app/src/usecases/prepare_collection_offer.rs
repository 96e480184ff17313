//! Use case for preparing a collection's info page offer

use std::sync::Arc;

use kc_core::ports::ReachabilityPort;
use kc_core::{AccessState, FilterCollection};
use tracing::{info_span, warn, Instrument};

use super::CheckCollectionAccess;

#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("No internet connection. Please try again later")]
    Offline,
}

/// Use case for preparing what the info page offers for a collection.
///
/// ## Behavior / 行为
/// - Collections shipped with the app skip the network check
/// - Any other collection needs a reachable network before its price or
///   example photos can be shown
/// - When online, returns the collection's access state
pub struct PrepareCollectionOffer {
    access: CheckCollectionAccess,
    reachability: Arc<dyn ReachabilityPort>,
}

impl PrepareCollectionOffer {
    pub fn new(access: CheckCollectionAccess, reachability: Arc<dyn ReachabilityPort>) -> Self {
        Self {
            access,
            reachability,
        }
    }

    pub async fn execute(&self, collection: &FilterCollection) -> Result<AccessState, OfferError> {
        let span = info_span!(
            "usecase.prepare_collection_offer.execute",
            collection = %collection.id
        );

        async {
            if !collection.bundled && !self.reachability.is_connected().await {
                warn!("Offline; cannot prepare collection offer");
                return Err(OfferError::Offline);
            }
            Ok(self.access.execute(collection).await)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{collection, memory_ledger, FakeCatalog, FixedReachability};

    fn use_case(online: bool) -> PrepareCollectionOffer {
        let catalog = Arc::new(FakeCatalog::new().with_product("filmA", "Film A", "$1.99"));
        PrepareCollectionOffer::new(
            CheckCollectionAccess::new(memory_ledger(), catalog),
            Arc::new(FixedReachability(online)),
        )
    }

    #[tokio::test]
    async fn test_offline_blocks_downloadable_collection() {
        let err = use_case(false)
            .execute(&collection("filmA", "Film A"))
            .await
            .unwrap_err();

        assert!(matches!(err, OfferError::Offline));
        assert_eq!(err.to_string(), "No internet connection. Please try again later");
    }

    #[tokio::test]
    async fn test_offline_allows_bundled_collection() {
        let mut bundled = collection("a", "A Collection");
        bundled.bundled = true;

        let state = use_case(false).execute(&bundled).await.unwrap();

        assert_eq!(state, AccessState::Free);
    }

    #[tokio::test]
    async fn test_online_returns_access_state() {
        let state = use_case(true)
            .execute(&collection("filmA", "Film A"))
            .await
            .unwrap();

        assert!(matches!(state, AccessState::Locked(_)));
    }
}
