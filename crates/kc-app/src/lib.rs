//! Application layer: use cases over the unlock ledger and purchase ports.

pub mod app_paths;
pub mod deps;
pub mod service;
pub mod usecases;

#[cfg(test)]
mod test_support;

pub use deps::AppDeps;
pub use service::UnlockService;
