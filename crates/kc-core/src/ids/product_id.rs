use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::CollectionId;

/// Fully-qualified purchase identifier as the purchase provider reports it:
/// `"<bundle namespace>.<collection suffix>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the qualified identifier for a collection under `namespace`.
    pub fn qualify(namespace: &str, collection: &CollectionId) -> Self {
        if namespace.is_empty() {
            return Self(collection.as_str().to_string());
        }
        Self(format!("{namespace}.{collection}"))
    }

    /// Derive the collection identifier by stripping `"<namespace>."`.
    ///
    /// An identifier that does not carry the prefix is already bare and is
    /// returned verbatim.
    pub fn collection_id(&self, namespace: &str) -> CollectionId {
        if !namespace.is_empty() {
            if let Some(suffix) = self
                .0
                .strip_prefix(namespace)
                .and_then(|rest| rest.strip_prefix('.'))
            {
                return CollectionId::from(suffix);
            }
        }
        CollectionId::from(self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
