mod check_collection_access;
mod list_unlocked_collections;
mod prepare_collection_offer;
mod purchase_collection;
mod reconciliation_listener;
mod toggle_unlock;

pub use check_collection_access::CheckCollectionAccess;
pub use list_unlocked_collections::ListUnlockedCollections;
pub use prepare_collection_offer::{OfferError, PrepareCollectionOffer};
pub use purchase_collection::{PurchaseCollection, PurchaseCollectionError};
pub use reconciliation_listener::{ReconcileReport, ReconciliationListener};
pub use toggle_unlock::{LockCollection, UnlockCollection};
