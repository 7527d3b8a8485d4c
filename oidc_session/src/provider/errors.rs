use thiserror::Error;

use crate::utils::UtilError;

use super::broker::AuthorizationError;
use super::discovery::DiscoveryError;
use super::idtoken::TokenVerificationError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Id token error: {0}")]
    IdToken(#[from] TokenVerificationError),

    #[error("State mismatch in authorization reply")]
    StateMismatch,

    #[error("End session error: {0}")]
    EndSession(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serde error: {0}")]
    Serde(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
