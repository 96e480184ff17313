//! # kc-core
//!
//! Core domain models and the unlock ledger for Kontax Cam.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Persistence, the purchase provider and network checks are reached through
//! the traits in [`ports`].

// Public module exports
pub mod app_dirs;
pub mod collection;
pub mod config;
pub mod effects;
pub mod ids;
pub mod ports;
pub mod purchase;
pub mod unlock;

// Re-export commonly used types at the crate root
pub use collection::{AccessState, CollectionRegistry, FilterCollection, PreviewImage};
pub use config::AppConfig;
pub use effects::EffectInfo;
pub use ids::{CollectionId, ProductId};
pub use purchase::{PurchaseDescriptor, PurchaseDetails, PurchaseFailure};
pub use unlock::{LedgerError, UnlockLedger, UnlockStateChanged, PURCHASED_FILTERS_KEY};
