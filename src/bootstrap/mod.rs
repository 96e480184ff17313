//! Process bootstrap: configuration, tracing, and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_empty};
pub use wiring::{build_service, resolve_paths};
