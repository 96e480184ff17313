use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use kc_core::ports::UnlockStorePort;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// JSON-file-backed key-value store.
///
/// The file holds one JSON object mapping keys to string arrays, e.g.
/// `{"purchasedFilters": ["filmA", "kg"]}`. Every save rewrites the whole
/// file through a temp file, `fsync`, then rename, so the file on disk is
/// always either the previous or the new document.
pub struct FileUnlockStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

type Document = BTreeMap<String, Vec<String>>;

impl FileUnlockStore {
    /// Creates a store persisting to `path`. Nothing is touched until the
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn read_document(&self) -> Result<Document> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read store failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parse store failed: {}", self.path.display()))
    }

    /// Write `content` durably: temp file, flush to disk, rename over target.
    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("create temp store failed: {}", tmp_path.display()))?;
        file.write_all(content.as_bytes())
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("sync temp store failed: {}", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl UnlockStorePort for FileUnlockStore {
    async fn load_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let document = self.read_document().await?;
        Ok(document.get(key).cloned())
    }

    async fn save_list(&self, key: &str, values: &[String]) -> Result<()> {
        // Other keys in the document must survive this write.
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.insert(key.to_string(), values.to_vec());

        let content =
            serde_json::to_string_pretty(&document).context("serialize store failed")?;
        self.atomic_write(&content).await?;

        debug!(key, count = values.len(), path = %self.path.display(), "Store value saved");
        Ok(())
    }
}
