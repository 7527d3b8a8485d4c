use std::sync::Arc;

use crate::store::StorageBackend;

use super::errors::ProviderError;
use super::types::AccountInfo;

/// Storage key for the provider's cached-account list.
const ACCOUNT_CACHE_KEY: &str = "auth.accounts";

/// Accounts retained across process restarts.
///
/// Enumeration order is persistence order; the first entry is the one a
/// silent re-authentication selects.
pub(super) struct AccountCache {
    backend: Arc<dyn StorageBackend>,
}

impl AccountCache {
    pub(super) fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub(super) async fn load(&self) -> Result<Vec<AccountInfo>, ProviderError> {
        let Some(raw) = self
            .backend
            .get(ACCOUNT_CACHE_KEY)
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))?
        else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| ProviderError::Serde(e.to_string()))
    }

    /// Record an authenticated account, replacing a previous entry for the
    /// same subject and keeping enumeration order otherwise.
    pub(super) async fn remember(&self, account: &AccountInfo) -> Result<(), ProviderError> {
        let mut accounts = self.load().await?;
        match accounts
            .iter_mut()
            .find(|cached| cached.account_id == account.account_id)
        {
            Some(existing) => *existing = account.clone(),
            None => accounts.push(account.clone()),
        }

        let raw =
            serde_json::to_string(&accounts).map_err(|e| ProviderError::Serde(e.to_string()))?;
        self.backend
            .put(ACCOUNT_CACHE_KEY, &raw)
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))
    }

    pub(super) async fn clear(&self) -> Result<(), ProviderError> {
        self.backend
            .remove(ACCOUNT_CACHE_KEY)
            .await
            .map_err(|e| ProviderError::Storage(e.to_string()))
    }
}
