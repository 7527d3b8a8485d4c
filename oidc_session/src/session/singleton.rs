use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

use crate::provider::{AuthorizationBroker, OidcProvider, ProviderConfig};
use crate::store::{TokenStore, backend_from_env};

use super::errors::SessionError;
use super::manager::SessionManager;

/// The one session manager permitted per running process.
static SESSION_MANAGER: OnceCell<Arc<SessionManager>> = OnceCell::const_new();

/// The interactive seam the host application installs before first use.
static INTERACTIVE_BROKER: Mutex<Option<Arc<dyn AuthorizationBroker>>> = Mutex::new(None);

/// Install the broker that will carry user-mediated authorizations.
///
/// Typically called once by the UI shell during startup, before anything
/// touches [`session_manager`].
pub fn register_broker(broker: Arc<dyn AuthorizationBroker>) {
    let mut slot = INTERACTIVE_BROKER
        .lock()
        .expect("broker registry poisoned");
    *slot = Some(broker);
}

/// The process-wide session manager, constructed on first call from
/// environment configuration.
///
/// Construction is memoized: concurrent first callers await the same
/// in-flight future and observe the same instance. A construction failure
/// leaves the slot empty so a later call may retry.
pub async fn session_manager() -> Result<Arc<SessionManager>, SessionError> {
    SESSION_MANAGER
        .get_or_try_init(|| async {
            let broker = {
                let slot = INTERACTIVE_BROKER
                    .lock()
                    .expect("broker registry poisoned");
                slot.clone()
            }
            .ok_or_else(|| {
                SessionError::Config("No authorization broker registered".to_string())
            })?;

            let backend = backend_from_env()?;
            let provider = OidcProvider::new(ProviderConfig::from_env(), broker, backend.clone());

            tracing::info!("Constructing process-wide session manager");
            Ok(Arc::new(SessionManager::new(
                Arc::new(provider),
                TokenStore::new(backend),
            )))
        })
        .await
        .map(Arc::clone)
}
