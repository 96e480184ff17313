use serde::{Deserialize, Serialize};

use crate::purchase::PurchaseDescriptor;

/// Whether a collection can be used, and if not, what it costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessState {
    /// Not sold; always usable.
    Free,
    /// Sold and present in the unlock ledger.
    Unlocked,
    /// Sold and not yet bought.
    Locked(PurchaseDescriptor),
}

impl AccessState {
    /// Decide access from the catalog lookup and the ledger answer.
    pub fn resolve(descriptor: Option<PurchaseDescriptor>, in_ledger: bool) -> Self {
        match descriptor {
            None => AccessState::Free,
            Some(_) if in_ledger => AccessState::Unlocked,
            Some(descriptor) => AccessState::Locked(descriptor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CollectionId;

    fn descriptor() -> PurchaseDescriptor {
        PurchaseDescriptor {
            identifier: CollectionId::from("filmA"),
            title: "Film A".to_string(),
            display_price: "$1.99".to_string(),
        }
    }

    #[test]
    fn test_no_descriptor_is_free_even_if_ledger_says_no() {
        assert_eq!(AccessState::resolve(None, false), AccessState::Free);
    }

    #[test]
    fn test_sold_collection_follows_ledger() {
        assert_eq!(
            AccessState::resolve(Some(descriptor()), true),
            AccessState::Unlocked
        );
        let locked = AccessState::resolve(Some(descriptor()), false);
        assert_eq!(locked, AccessState::Locked(descriptor()));
    }
}
