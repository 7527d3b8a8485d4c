//! oidc-session - Client-side OIDC session management
//!
//! This crate coordinates the pieces a dashboard-style application needs to
//! keep a user signed in: a lazily constructed identity-provider client, a
//! memoized asynchronous initialization pass, an interactive popup-style
//! login flow, durable token persistence, and a reactive session record for
//! route guards.

mod guard;
mod provider;
mod session;
mod store;
mod utils;

#[cfg(test)]
mod test_utils;

pub use guard::{RouteDecision, RouteGuard, evaluate};

pub use provider::{
    AccountInfo, AuthorizationBroker, AuthorizationError, AuthorizationReply,
    AuthorizationRequest, DiscoveryDocument, DiscoveryError, IdTokenClaims, IdentityProvider,
    OidcProvider, ProviderConfig, ProviderError, TokenVerificationError,
};

pub use session::{
    SessionError, SessionManager, SessionSnapshot, register_broker, session_manager,
};

pub use store::{
    FileStore, InMemoryStore, StorageBackend, StoreError, TokenStore, backend_from_env,
};

pub use utils::UtilError;
