use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::store::errors::StoreError;

/// Durable key-value persistence for session artifacts (the token record and
/// the provider's cached accounts).
///
/// Keys are restricted to `[A-Za-z0-9._-]` so every backend can map them to
/// its naming scheme without escaping.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Store a value under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Fetch the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub struct InMemoryStore {
    pub(super) entries: Mutex<HashMap<String, String>>,
}

pub struct FileStore {
    pub(super) root: PathBuf,
}

pub(super) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_dotted_names() {
        assert!(validate_key("auth.token").is_ok());
        assert!(validate_key("auth_accounts-v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_separators_and_empty() {
        // Path separators and empty keys must not reach a backend
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("spaced key").is_err());
    }
}
