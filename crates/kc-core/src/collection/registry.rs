use serde::{Deserialize, Serialize};

use crate::ids::CollectionId;

/// A named set of filters, optionally sold as one purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCollection {
    pub id: CollectionId,
    pub name: String,
    pub image_url: String,
    /// Shipped with the app; usable without any network round trip.
    #[serde(default)]
    pub bundled: bool,
}

/// Ordered list of known collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionRegistry {
    collections: Vec<FilterCollection>,
}

impl CollectionRegistry {
    /// Later entries with an id already seen are dropped.
    pub fn new(collections: Vec<FilterCollection>) -> Self {
        let mut unique: Vec<FilterCollection> = Vec::with_capacity(collections.len());
        for collection in collections {
            if unique.iter().any(|c| c.id == collection.id) {
                tracing::warn!(collection = %collection.id, "Duplicate collection id ignored");
                continue;
            }
            unique.push(collection);
        }
        Self { collections: unique }
    }

    pub fn get(&self, id: &CollectionId) -> Option<&FilterCollection> {
        self.collections.iter().find(|c| &c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterCollection> {
        self.collections.iter()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
