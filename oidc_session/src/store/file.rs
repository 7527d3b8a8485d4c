use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::store::errors::StoreError;
use crate::store::types::{FileStore, StorageBackend, validate_key};

impl FileStore {
    /// A store that keeps one file per key under `root`. The directory is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        tracing::debug!("Creating file session store at {}", root.display());
        Self { root }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl StorageBackend for FileStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.entry_path(key), value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        match tokio::fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
pub(crate) fn temp_root(label: &str) -> PathBuf {
    let suffix = crate::utils::gen_random_string(8).expect("entropy available in tests");
    std::env::temp_dir().join(format!("oidc-session-{label}-{suffix}"))
}
