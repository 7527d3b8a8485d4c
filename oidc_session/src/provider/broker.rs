use async_trait::async_trait;
use thiserror::Error;

/// A fully prepared authorization request for the user-mediated step.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Assembled authorization URL the user agent must visit.
    pub authorization_url: String,
    /// Anti-forgery value the provider echoes back in the redirect.
    pub state: String,
}

/// Redirect parameters captured after the user completed authorization.
#[derive(Debug, Clone)]
pub struct AuthorizationReply {
    pub code: String,
    pub state: String,
}

/// Tagged outcome of a failed user-mediated authorization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Authorization canceled by the user")]
    Canceled,

    #[error("Authorization window blocked by the user agent")]
    Blocked,

    #[error("Authorization failed: {0}")]
    Failed(String),
}

/// The interactive seam of the login flow.
///
/// The host application decides how the authorization URL reaches the user —
/// a popup window, a system browser, a webview — and resolves with the
/// redirect parameters once the provider hands control back. A pending
/// authorization is not cancellable by this crate; closing the window must
/// surface as [`AuthorizationError::Canceled`] from the broker itself.
#[async_trait]
pub trait AuthorizationBroker: Send + Sync {
    async fn authorize(
        &self,
        request: AuthorizationRequest,
    ) -> Result<AuthorizationReply, AuthorizationError>;
}
