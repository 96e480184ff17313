//! Fakes shared by the use case tests.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use kc_core::ports::{PurchaseCatalogPort, ReachabilityPort};
use kc_core::purchase::{PurchaseDescriptor, PurchaseDetails, PurchaseFailure};
use kc_core::{CollectionId, FilterCollection, ProductId, UnlockLedger};
use kc_infra::InMemoryUnlockStore;
use tokio::sync::mpsc;

pub const NAMESPACE: &str = "com.kontax.cam";

pub fn memory_ledger() -> Arc<UnlockLedger> {
    Arc::new(UnlockLedger::new(Arc::new(InMemoryUnlockStore::new())))
}

pub fn collection(id: &str, name: &str) -> FilterCollection {
    FilterCollection {
        id: CollectionId::from(id),
        name: name.to_string(),
        image_url: String::new(),
        bundled: false,
    }
}

pub struct FixedReachability(pub bool);

#[async_trait]
impl ReachabilityPort for FixedReachability {
    async fn is_connected(&self) -> bool {
        self.0
    }
}

pub struct FakeCatalog {
    products: Vec<PurchaseDescriptor>,
    next_failure: Mutex<Option<PurchaseFailure>>,
    removed_subscribers: Mutex<Vec<mpsc::UnboundedSender<BTreeSet<String>>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            next_failure: Mutex::new(None),
            removed_subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_product(mut self, id: &str, title: &str, price: &str) -> Self {
        self.products.push(PurchaseDescriptor {
            identifier: CollectionId::from(id),
            title: title.to_string(),
            display_price: price.to_string(),
        });
        self
    }

    pub fn fail_next(&self, failure: PurchaseFailure) {
        *self.next_failure.lock().unwrap() = Some(failure);
    }

    pub fn push_removed(&self, qualified: &[&str]) {
        let batch: BTreeSet<String> = qualified.iter().map(|s| s.to_string()).collect();
        self.removed_subscribers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(batch.clone()).is_ok());
    }

    pub fn close_removed(&self) {
        self.removed_subscribers.lock().unwrap().clear();
    }
}

#[async_trait]
impl PurchaseCatalogPort for FakeCatalog {
    fn bundle_namespace(&self) -> String {
        NAMESPACE.to_string()
    }

    async fn lookup(&self, title: &str) -> Option<PurchaseDescriptor> {
        self.products.iter().find(|p| p.title == title).cloned()
    }

    async fn purchase(&self, product: &CollectionId) -> Result<PurchaseDetails, PurchaseFailure> {
        if let Some(failure) = self.next_failure.lock().unwrap().take() {
            return Err(failure);
        }
        Ok(PurchaseDetails {
            product_id: ProductId::qualify(NAMESPACE, product),
            quantity: 1,
            transaction_id: Some("txn-1".to_string()),
            purchased_at: Utc::now(),
        })
    }

    fn subscribe_removed(&self) -> mpsc::UnboundedReceiver<BTreeSet<String>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.removed_subscribers.lock().unwrap().push(tx);
        rx
    }
}
