use std::{env, sync::Arc, sync::LazyLock};

use crate::store::errors::StoreError;
use crate::store::types::{FileStore, InMemoryStore, StorageBackend};

/// Storage key for the session token record.
pub(crate) static AUTH_TOKEN_KEY: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_TOKEN_KEY").unwrap_or_else(|_| "auth.token".to_string()));

static SESSION_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_STORE_TYPE").unwrap_or_else(|_| "memory".to_string()));

static SESSION_STORE_PATH: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_STORE_PATH").unwrap_or_else(|_| ".auth-cache".to_string()));

/// Build the storage backend selected by `SESSION_STORE_TYPE`.
///
/// `memory` keeps the session for the process lifetime only; `file` persists
/// it under `SESSION_STORE_PATH` so cached accounts survive restarts.
pub fn backend_from_env() -> Result<Arc<dyn StorageBackend>, StoreError> {
    let store_type = SESSION_STORE_TYPE.as_str();

    tracing::info!("Initializing session store with type: {}", store_type);

    match store_type {
        "memory" => Ok(Arc::new(InMemoryStore::new())),
        "file" => Ok(Arc::new(FileStore::new(SESSION_STORE_PATH.as_str()))),
        t => Err(StoreError::Backend(format!(
            "Unsupported session store type: {t}. Supported types are 'memory' and 'file'"
        ))),
    }
}
