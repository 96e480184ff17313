//! Purchase domain types.
//!
//! These describe what the purchase provider hands back. The provider's
//! transaction protocol itself stays behind [`crate::ports::PurchaseCatalogPort`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CollectionId, ProductId};

/// Purchasable product for one filter collection.
///
/// Looked up by matching `title` against the collection name. A collection
/// without a descriptor is free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDescriptor {
    pub identifier: CollectionId,
    pub title: String,
    pub display_price: String,
}

/// Receipt of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDetails {
    pub product_id: ProductId,
    pub quantity: u32,
    pub transaction_id: Option<String>,
    pub purchased_at: DateTime<Utc>,
}

/// Failure reported by the purchase provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseFailure {
    #[error("purchase cancelled by user")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

impl PurchaseFailure {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PurchaseFailure::Cancelled)
    }
}
