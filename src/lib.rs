//! Kontax Cam unlock state
//!
//! Bootstrap crate wiring the domain (`kc-core`), use cases (`kc-app`) and
//! adapters (`kc-infra`) into a runnable process.

pub mod bootstrap;
pub mod cli;
