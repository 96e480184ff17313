use async_trait::async_trait;

/// Key-value persistence for whole string lists.
///
/// # Behavior
/// - `load_list()` returns `Ok(None)` when the key has never been written.
/// - `save_list()` overwrites the whole value and returns only after the
///   write is durable; a process exit right after it returns keeps the value.
#[async_trait]
pub trait UnlockStorePort: Send + Sync {
    async fn load_list(&self, key: &str) -> anyhow::Result<Option<Vec<String>>>;
    async fn save_list(&self, key: &str, values: &[String]) -> anyhow::Result<()>;
}
