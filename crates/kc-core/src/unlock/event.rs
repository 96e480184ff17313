use serde::{Deserialize, Serialize};

use crate::ids::CollectionId;

/// Refresh signal broadcast whenever the ledger changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockStateChanged {
    pub collection: CollectionId,
    pub unlocked: bool,
}
