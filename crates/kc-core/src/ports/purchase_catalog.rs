use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::ids::CollectionId;
use crate::purchase::{PurchaseDescriptor, PurchaseDetails, PurchaseFailure};

/// The in-app-purchase provider.
///
/// # Behavior
/// - `lookup()` matches a product by its title; `None` means the collection
///   is not sold (it is free).
/// - `purchase()` takes the bare product suffix. Duplicate in-flight
///   requests for the same product are the provider's concern.
/// - `subscribe_removed()` yields batches of fully-qualified product
///   identifiers whose entitlement was revoked (refunds, expiry). Each
///   subscriber gets its own unbounded queue, so a slow consumer never loses
///   a batch. Batches sent before subscribing are not replayed; the stream
///   ends when the provider shuts down.
#[async_trait]
pub trait PurchaseCatalogPort: Send + Sync {
    /// Prefix qualifying product identifiers, e.g. `com.kontax.cam`.
    fn bundle_namespace(&self) -> String;

    async fn lookup(&self, title: &str) -> Option<PurchaseDescriptor>;

    async fn purchase(&self, product: &CollectionId) -> Result<PurchaseDetails, PurchaseFailure>;

    fn subscribe_removed(&self) -> mpsc::UnboundedReceiver<BTreeSet<String>>;
}
