use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ProviderError;

/// An authenticated identity as asserted by the provider.
///
/// Produced by a successful interactive login or by cached-account
/// enumeration; immutable once obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Provider subject identifier (`sub` claim).
    pub account_id: String,
    pub display_name: String,
    /// Tenant/directory identifier when the provider issues one (`tid` claim).
    pub tenant_id: Option<String>,
    /// The opaque ID token asserting this identity.
    pub id_token: String,
    pub issued_at: DateTime<Utc>,
}

/// Boundary to the identity provider.
///
/// `OidcProvider` is the production implementation; tests substitute fakes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// One-time startup handshake (endpoint discovery).
    async fn startup(&self) -> Result<(), ProviderError>;

    /// Accounts retained from earlier sessions, in provider-defined order.
    async fn cached_accounts(&self) -> Result<Vec<AccountInfo>, ProviderError>;

    /// Drive a user-mediated authorization to completion.
    async fn interactive_login(&self) -> Result<AccountInfo, ProviderError>;

    /// Terminate the provider-side session and forget cached accounts.
    async fn end_session(&self) -> Result<(), ProviderError>;
}

#[derive(Debug, Deserialize, Serialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
    token_type: String,
    expires_in: Option<u64>,
    scope: Option<String>,
    pub(super) id_token: Option<String>,
}
