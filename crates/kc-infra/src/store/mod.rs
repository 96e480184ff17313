mod file_store;
mod memory_store;

pub use file_store::FileUnlockStore;
pub use memory_store::InMemoryUnlockStore;
