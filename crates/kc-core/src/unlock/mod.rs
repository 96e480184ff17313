//! Unlock ledger: the persisted set of collections the user holds an
//! entitlement for.

mod error;
mod event;
mod ledger;

pub use error::LedgerError;
pub use event::UnlockStateChanged;
pub use ledger::{UnlockLedger, PURCHASED_FILTERS_KEY};
