use thiserror::Error;

use crate::provider::ProviderError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    /// `login()`/`logout()` invoked before `init()` completed.
    #[error("Session manager is not initialized")]
    NotInitialized,

    /// A prior `login()` is still pending.
    #[error("An interactive login is already in progress")]
    LoginInProgress,

    #[error("Login failed: {0}")]
    Login(#[source] ProviderError),

    #[error("Logout failed: {0}")]
    Logout(#[source] ProviderError),

    /// Error from token persistence
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}
