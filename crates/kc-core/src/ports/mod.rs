//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. Use cases receive them as
//! `Arc<dyn Port>` so that tests can substitute in-memory fakes.

pub mod app_dirs;
pub mod errors;
pub mod purchase_catalog;
pub mod reachability;
pub mod unlock_store;

pub use app_dirs::AppDirsPort;
pub use errors::AppDirsError;
pub use purchase_catalog::PurchaseCatalogPort;
pub use reachability::ReachabilityPort;
pub use unlock_store::UnlockStorePort;
