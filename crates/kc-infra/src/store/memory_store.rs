use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use kc_core::ports::UnlockStorePort;

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryUnlockStore {
    values: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryUnlockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnlockStorePort for InMemoryUnlockStore {
    async fn load_list(&self, key: &str) -> anyhow::Result<Option<Vec<String>>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn save_list(&self, key: &str, values: &[String]) -> anyhow::Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }
}
