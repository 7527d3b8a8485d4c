use std::sync::Arc;

use crate::store::config::AUTH_TOKEN_KEY;
use crate::store::errors::StoreError;
use crate::store::types::StorageBackend;

/// Persistence for the single bearer token of the active session.
///
/// One record under one fixed key: the token written by the last successful
/// login, cleared by logout. No expiry tracking — a stored token is treated
/// as valid until explicitly cleared.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
}

impl TokenStore {
    /// Bind a backend to the configured token key (`AUTH_TOKEN_KEY`).
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_key(backend, AUTH_TOKEN_KEY.clone())
    }

    pub fn with_key(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub async fn set(&self, token: &str) -> Result<(), StoreError> {
        self.backend.put(&self.key, token).await
    }

    pub async fn get(&self) -> Result<Option<String>, StoreError> {
        self.backend.get(&self.key).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::InMemoryStore;

    #[tokio::test]
    async fn test_set_then_get() {
        // Given a token store over a memory backend
        let store = TokenStore::new(Arc::new(InMemoryStore::new()));

        // When storing a token
        store.set("tok-xyz").await.unwrap();

        // Then it is retrievable
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok-xyz"));
    }

    #[tokio::test]
    async fn test_get_without_session() {
        // Given a fresh token store
        let store = TokenStore::new(Arc::new(InMemoryStore::new()));

        // When no token was ever stored
        let token = store.get().await.unwrap();

        // Then the record is absent
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_previous_record() {
        // Given a store holding a token
        let store = TokenStore::new(Arc::new(InMemoryStore::new()));
        store.set("tok-old").await.unwrap();

        // When a new login stores a fresh token
        store.set("tok-new").await.unwrap();

        // Then only the latest record is live
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok-new"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        // Given a store holding a token
        let store = TokenStore::new(Arc::new(InMemoryStore::new()));
        store.set("tok-xyz").await.unwrap();

        // When clearing twice
        store.clear().await.unwrap();
        let second = store.clear().await;

        // Then the record is gone and the second clear still succeeds
        assert!(store.get().await.unwrap().is_none());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_custom_key_does_not_collide() {
        // Given two token stores with different keys on one backend
        let backend: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
        let primary = TokenStore::with_key(backend.clone(), "auth.token");
        let secondary = TokenStore::with_key(backend, "auth.token.staging");

        // When each stores its own token
        primary.set("tok-prod").await.unwrap();
        secondary.set("tok-staging").await.unwrap();

        // Then the records stay independent
        assert_eq!(primary.get().await.unwrap().as_deref(), Some("tok-prod"));
        assert_eq!(
            secondary.get().await.unwrap().as_deref(),
            Some("tok-staging")
        );
    }
}
