//! # Pure Data Module - Data Transfer Objects Only
//!
//! Maps the TOML configuration file into [`AppConfig`]. Missing values become
//! empty values; nothing here validates or invents defaults.

use std::path::PathBuf;

use crate::collection::FilterCollection;
use crate::ids::CollectionId;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix qualifying purchase identifiers (may be empty)
    pub bundle_namespace: String,

    /// Host serving collection example photos
    pub preview_base_url: String,

    /// `host:port` probed to decide whether the device is online
    pub reachability_host: String,

    pub reachability_timeout_ms: u64,

    /// Overrides the platform data directory when set
    pub data_dir: Option<PathBuf>,

    pub collections: Vec<FilterCollection>,

    /// Products offered by the sandbox purchase catalog
    pub sandbox_products: Vec<SandboxProduct>,
}

/// One product entry for the sandbox purchase catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxProduct {
    pub id: CollectionId,
    pub title: String,
    pub price: String,
}

fn str_at<'a>(value: &'a toml::Value, section: &str, key: &str) -> Option<&'a str> {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_str())
}

fn entry_str(entry: &toml::Value, key: &str) -> String {
    entry
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Must not contain validation or default value logic. Empty strings
    /// are valid facts.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let collections = toml_value
            .get("collections")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| FilterCollection {
                        id: CollectionId::from(entry_str(entry, "id")),
                        name: entry_str(entry, "name"),
                        image_url: entry_str(entry, "image_url"),
                        bundled: entry
                            .get("bundled")
                            .and_then(|v| v.as_bool())
                            .unwrap_or(false),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let sandbox_products = toml_value
            .get("sandbox")
            .and_then(|s| s.get("products"))
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| SandboxProduct {
                        id: CollectionId::from(entry_str(entry, "id")),
                        title: entry_str(entry, "title"),
                        price: entry_str(entry, "price"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bundle_namespace: str_at(toml_value, "store", "bundle_namespace")
                .unwrap_or("")
                .to_string(),
            preview_base_url: str_at(toml_value, "preview", "base_url")
                .unwrap_or("")
                .to_string(),
            reachability_host: str_at(toml_value, "network", "reachability_host")
                .unwrap_or("")
                .to_string(),
            reachability_timeout_ms: toml_value
                .get("network")
                .and_then(|n| n.get("reachability_timeout_ms"))
                .and_then(|v| v.as_integer())
                .and_then(|ms| u64::try_from(ms).ok())
                .unwrap_or(0),
            data_dir: str_at(toml_value, "storage", "data_dir").map(PathBuf::from),
            collections,
            sandbox_products,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            bundle_namespace: String::new(),
            preview_base_url: String::new(),
            reachability_host: String::new(),
            reachability_timeout_ms: 0,
            data_dir: None,
            collections: Vec::new(),
            sandbox_products: Vec::new(),
        }
    }
}
