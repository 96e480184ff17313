//! # Application Dependencies
//!
//! Parameter grouping for building use cases. Not a builder: every field is
//! required and nothing here has defaults or hidden logic.

use std::sync::Arc;

use kc_core::ports::{PurchaseCatalogPort, ReachabilityPort};
use kc_core::{CollectionRegistry, UnlockLedger};

pub struct AppDeps {
    pub ledger: Arc<UnlockLedger>,
    pub catalog: Arc<dyn PurchaseCatalogPort>,
    pub reachability: Arc<dyn ReachabilityPort>,
    pub collections: Arc<CollectionRegistry>,
}
