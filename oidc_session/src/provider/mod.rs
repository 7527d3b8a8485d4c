mod accounts;
mod broker;
mod config;
mod discovery;
mod errors;
mod idtoken;
mod oidc;
mod types;

pub use broker::{
    AuthorizationBroker, AuthorizationError, AuthorizationReply, AuthorizationRequest,
};
pub use config::ProviderConfig;
pub use discovery::{DiscoveryDocument, DiscoveryError};
pub use errors::ProviderError;
pub use idtoken::{IdTokenClaims, TokenVerificationError};
pub use oidc::OidcProvider;
pub use types::{AccountInfo, IdentityProvider};

use std::time::Duration;

/// Per-request deadline for every provider-facing HTTP call.
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
