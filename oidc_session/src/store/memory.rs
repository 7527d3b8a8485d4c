use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::store::errors::StoreError;
use crate::store::types::{InMemoryStore, StorageBackend, validate_key};

impl InMemoryStore {
    pub fn new() -> Self {
        tracing::debug!("Creating new in-memory session store");
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
