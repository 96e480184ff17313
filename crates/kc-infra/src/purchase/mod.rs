mod sandbox_catalog;

pub use sandbox_catalog::SandboxPurchaseCatalog;
