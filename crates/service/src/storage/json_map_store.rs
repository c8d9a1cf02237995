use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ClientError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a JSON file. An unreadable or corrupt file
/// starts out empty and is overwritten on the next save.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Load the store from a path. Nothing is written until the first mutation.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ClientError> {
        let file_path = path.into();
        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %file_path.display(), error = %e, "ignoring unreadable state file");
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn save(&self) -> Result<(), ClientError> {
        common::env::ensure_parent_dir(&self.file_path)
            .await
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        let map = self.inner.read().await;
        let data = serde_json::to_vec_pretty(&*map).map_err(|e| ClientError::Storage(e.to_string()))?;
        drop(map);
        fs::write(&self.file_path, data).await?;
        Ok(())
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Apply a mutation to the underlying map and persist.
    pub async fn update_map<F>(&self, f: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut HashMap<K, V>),
    {
        let mut map = self.inner.write().await;
        f(&mut map);
        drop(map);
        self.save().await
    }
}
