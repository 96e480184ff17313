pub mod fs;
pub mod network;
pub mod purchase;
pub mod store;

pub use fs::DirsAppDirsAdapter;
pub use network::TcpReachability;
pub use purchase::SandboxPurchaseCatalog;
pub use store::{FileUnlockStore, InMemoryUnlockStore};
