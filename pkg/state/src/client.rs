use serde::Serialize;
use serde::de::DeserializeOwned;
use slatedb::Db;
use slatedb::object_store::local::LocalFileSystem;
use slatedb::object_store::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Persistent registry store backed by SlateDB on a local filesystem.
/// In production this would use S3/R2/MinIO via the `object_store` crate.
///
/// Resources are stored as JSON; the encode/decode glue lives here so
/// handlers only ever see typed values.
#[derive(Clone)]
pub struct RegistryStore {
    db: Db,
}

impl RegistryStore {
    /// Open (or create) a registry store rooted at `path` on the local filesystem.
    pub async fn open(path: &str) -> anyhow::Result<Self> {
        info!("Opening SlateDB registry store at {}", path);

        // Ensure the data directory exists before opening the object store
        std::fs::create_dir_all(path)
            .map_err(|e| anyhow::anyhow!("Failed to create data directory {}: {}", path, e))?;

        let object_store = Arc::new(
            LocalFileSystem::new_with_prefix(path)
                .map_err(|e| anyhow::anyhow!("Failed to create local object store: {}", e))?,
        );
        let db = Db::open(Path::from("/"), object_store)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open SlateDB: {}", e))?;
        Ok(Self { db })
    }

    /// Store a resource as JSON under the given key.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let data = serde_json::to_vec(value)?;
        self.db
            .put(key.as_bytes(), &data)
            .await
            .map_err(|e| anyhow::anyhow!("SlateDB put failed: {}", e))
    }

    /// Fetch and decode the resource at `key`, or `None` if it does not exist.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.db.get(key.as_bytes()).await {
            Ok(Some(bytes)) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("SlateDB get failed: {}", e)),
        }
    }

    /// Whether a key exists, without decoding its value.
    pub async fn contains(&self, key: &str) -> anyhow::Result<bool> {
        match self.db.get(key.as_bytes()).await {
            Ok(value) => Ok(value.is_some()),
            Err(e) => Err(anyhow::anyhow!("SlateDB get failed: {}", e)),
        }
    }

    /// Delete a key from the store.
    pub async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.db
            .delete(key.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("SlateDB delete failed: {}", e))
    }

    /// Decode every resource stored under `prefix`.
    /// Records that fail to decode are skipped with a warning so one bad
    /// row cannot poison a whole listing.
    pub async fn list_json<T: DeserializeOwned>(&self, prefix: &str) -> anyhow::Result<Vec<T>> {
        let mut results = Vec::new();
        let mut iter = self
            .db
            .scan_prefix(prefix.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("SlateDB scan_prefix failed: {}", e))?;

        while let Ok(Some(kv)) = iter.next().await {
            match serde_json::from_slice(&kv.value) {
                Ok(item) => results.push(item),
                Err(e) => warn!(
                    "Skipping undecodable record {}: {}",
                    String::from_utf8_lossy(&kv.key),
                    e
                ),
            }
        }
        Ok(results)
    }

    /// Count the records stored under `prefix`.
    pub async fn count_prefix(&self, prefix: &str) -> anyhow::Result<usize> {
        let mut count = 0;
        let mut iter = self
            .db
            .scan_prefix(prefix.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("SlateDB scan_prefix failed: {}", e))?;

        while let Ok(Some(_)) = iter.next().await {
            count += 1;
        }
        Ok(count)
    }

    /// Gracefully close the registry store.
    pub async fn close(self) -> anyhow::Result<()> {
        info!("Closing SlateDB registry store");
        self.db
            .close()
            .await
            .map_err(|e| anyhow::anyhow!("SlateDB close failed: {}", e))
    }
}
