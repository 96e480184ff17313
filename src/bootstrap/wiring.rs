//! Dependency wiring: turns configuration into a ready [`UnlockService`].

use std::sync::Arc;

use anyhow::Context;
use kc_app::app_paths::AppPaths;
use kc_app::{AppDeps, UnlockService};
use kc_core::app_dirs::AppDirs;
use kc_core::config::AppConfig;
use kc_core::ports::AppDirsPort;
use kc_core::{CollectionRegistry, UnlockLedger};
use kc_infra::{DirsAppDirsAdapter, FileUnlockStore, SandboxPurchaseCatalog, TcpReachability};
use tracing::info;

/// Resolve application paths, honoring the configured data directory.
pub fn resolve_paths(config: &AppConfig) -> anyhow::Result<AppPaths> {
    let dirs = match &config.data_dir {
        Some(dir) if !dir.as_os_str().is_empty() => AppDirs {
            app_data_root: dir.clone(),
        },
        _ => DirsAppDirsAdapter::new()
            .get_app_dirs()
            .context("Failed to resolve application directories")?,
    };
    Ok(AppPaths::from_app_dirs(&dirs))
}

/// Build the service over the file-backed ledger and the sandbox catalog.
pub fn build_service(config: &AppConfig, paths: &AppPaths) -> UnlockService {
    let store = Arc::new(FileUnlockStore::new(&paths.store_path));
    let catalog = Arc::new(SandboxPurchaseCatalog::from_config(
        config.bundle_namespace.clone(),
        &config.sandbox_products,
    ));
    let reachability = Arc::new(TcpReachability::new(
        config.reachability_host.clone(),
        config.reachability_timeout_ms,
    ));

    info!(
        store = %paths.store_path.display(),
        collections = config.collections.len(),
        products = config.sandbox_products.len(),
        "Wiring unlock service"
    );

    UnlockService::new(AppDeps {
        ledger: Arc::new(UnlockLedger::new(store)),
        catalog,
        reachability,
        collections: Arc::new(CollectionRegistry::new(config.collections.clone())),
    })
}
