//! Purchase catalog that never talks to a store.
//!
//! Products come from configuration; every purchase succeeds unless a failure
//! was queued with [`SandboxPurchaseCatalog::fail_next`]. Revocations are
//! injected with [`SandboxPurchaseCatalog::revoke`]. Used for development
//! builds and tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use kc_core::config::SandboxProduct;
use kc_core::ids::{CollectionId, ProductId};
use kc_core::ports::PurchaseCatalogPort;
use kc_core::purchase::{PurchaseDescriptor, PurchaseDetails, PurchaseFailure};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct SandboxPurchaseCatalog {
    namespace: String,
    products: Vec<PurchaseDescriptor>,
    queued_failures: Mutex<HashMap<CollectionId, PurchaseFailure>>,
    removed_subscribers: Mutex<Vec<mpsc::UnboundedSender<BTreeSet<String>>>>,
}

impl SandboxPurchaseCatalog {
    pub fn new(namespace: impl Into<String>, products: Vec<PurchaseDescriptor>) -> Self {
        Self {
            namespace: namespace.into(),
            products,
            queued_failures: Mutex::new(HashMap::new()),
            removed_subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn from_config(namespace: impl Into<String>, products: &[SandboxProduct]) -> Self {
        let descriptors = products
            .iter()
            .map(|product| PurchaseDescriptor {
                identifier: product.id.clone(),
                title: product.title.clone(),
                display_price: product.price.clone(),
            })
            .collect();
        Self::new(namespace, descriptors)
    }

    /// Make the next purchase of `product` fail with `failure`.
    pub fn fail_next(&self, product: CollectionId, failure: PurchaseFailure) {
        if let Ok(mut queued) = self.queued_failures.lock() {
            queued.insert(product, failure);
        }
    }

    /// Push a revocation batch for `products` to every current subscriber.
    ///
    /// Returns the number of subscribers that received it. Subscribers whose
    /// receiver was dropped are forgotten.
    pub fn revoke(&self, products: &[CollectionId]) -> usize {
        let batch: BTreeSet<String> = products
            .iter()
            .map(|id| ProductId::qualify(&self.namespace, id).as_str().to_string())
            .collect();
        info!(count = batch.len(), "Sandbox revoking entitlements");

        let Ok(mut subscribers) = self.removed_subscribers.lock() else {
            warn!("Sandbox removal subscribers poisoned; batch not delivered");
            return 0;
        };
        subscribers.retain(|tx| tx.send(batch.clone()).is_ok());
        subscribers.len()
    }

    /// End every removal stream, as a provider shutting down would.
    pub fn close_removed(&self) {
        if let Ok(mut subscribers) = self.removed_subscribers.lock() {
            subscribers.clear();
        }
    }

    fn take_queued_failure(&self, product: &CollectionId) -> Option<PurchaseFailure> {
        self.queued_failures
            .lock()
            .ok()
            .and_then(|mut queued| queued.remove(product))
    }
}

#[async_trait]
impl PurchaseCatalogPort for SandboxPurchaseCatalog {
    fn bundle_namespace(&self) -> String {
        self.namespace.clone()
    }

    async fn lookup(&self, title: &str) -> Option<PurchaseDescriptor> {
        self.products.iter().find(|p| p.title == title).cloned()
    }

    async fn purchase(&self, product: &CollectionId) -> Result<PurchaseDetails, PurchaseFailure> {
        if let Some(failure) = self.take_queued_failure(product) {
            debug!(product = %product, failure = %failure, "Sandbox purchase failing as queued");
            return Err(failure);
        }

        if !self.products.iter().any(|p| &p.identifier == product) {
            return Err(PurchaseFailure::Failed(format!(
                "Cannot connect to the store: unknown product {product}"
            )));
        }

        Ok(PurchaseDetails {
            product_id: ProductId::qualify(&self.namespace, product),
            quantity: 1,
            transaction_id: Some(uuid::Uuid::new_v4().to_string()),
            purchased_at: Utc::now(),
        })
    }

    fn subscribe_removed(&self) -> mpsc::UnboundedReceiver<BTreeSet<String>> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.removed_subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}
