use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell, watch};

use crate::provider::{AccountInfo, IdentityProvider, ProviderError};
use crate::store::TokenStore;

use super::errors::SessionError;
use super::types::SessionSnapshot;

/// Coordinates the identity-provider client, token persistence and the
/// reactive session record.
///
/// One instance per process (see [`crate::session_manager`]); all mutations
/// of the session record go through this type and are published to
/// subscribers via a watch channel.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    tokens: TokenStore,
    init_cell: OnceCell<()>,
    login_gate: Mutex<()>,
    state_tx: watch::Sender<SessionSnapshot>,
}

impl SessionManager {
    pub fn new(provider: Arc<dyn IdentityProvider>, tokens: TokenStore) -> Self {
        let (state_tx, _) = watch::channel(SessionSnapshot::initial());
        Self {
            provider,
            tokens,
            init_cell: OnceCell::new(),
            login_gate: Mutex::new(()),
            state_tx,
        }
    }

    /// The current session record.
    pub fn state(&self) -> SessionSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Observe every session-record change. The receiver starts at the
    /// current value; `last-writer-wins` — intermediate values may be
    /// skipped by a slow reader, never reordered.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_tx.subscribe()
    }

    /// One-time asynchronous startup: provider handshake and cached-account
    /// enumeration.
    ///
    /// Memoized — concurrent callers share the in-flight pass and observe
    /// the same outcome; exactly one handshake runs per process. A handshake
    /// or enumeration failure is logged and swallowed: the session still
    /// becomes initialized, just unauthenticated.
    pub async fn init(&self) -> SessionSnapshot {
        self.init_cell
            .get_or_init(|| async {
                let restored = match self.bootstrap().await {
                    Ok(found) => found,
                    Err(e) => {
                        tracing::warn!("Session bootstrap failed, starting unauthenticated: {e}");
                        None
                    }
                };

                self.state_tx.send_modify(|state| {
                    if let Some(account) = restored {
                        tracing::info!(
                            account_id = %account.account_id,
                            "Restored session from cached account"
                        );
                        state.set_account(account);
                    }
                    state.is_initialized = true;
                });
            })
            .await;

        self.state()
    }

    async fn bootstrap(&self) -> Result<Option<AccountInfo>, ProviderError> {
        self.provider.startup().await?;
        let mut accounts = self.provider.cached_accounts().await?;
        if accounts.is_empty() {
            Ok(None)
        } else {
            // Deterministic selection: first account in enumeration order
            Ok(Some(accounts.remove(0)))
        }
    }

    /// Drive an interactive login.
    ///
    /// Fails fast with [`SessionError::NotInitialized`] before `init()` has
    /// completed and with [`SessionError::LoginInProgress`] while a prior
    /// call is pending; neither touches session state or the token store.
    pub async fn login(&self) -> Result<AccountInfo, SessionError> {
        if !self.state_tx.borrow().is_initialized {
            return Err(SessionError::NotInitialized);
        }

        let Ok(_flow) = self.login_gate.try_lock() else {
            return Err(SessionError::LoginInProgress);
        };

        let account = self
            .provider
            .interactive_login()
            .await
            .map_err(SessionError::Login)?;

        // Persist before publishing: a failed write must leave consumers on
        // the previous state.
        self.tokens.set(&account.id_token).await?;

        self.state_tx
            .send_modify(|state| state.set_account(account.clone()));

        tracing::info!(account_id = %account.account_id, "Interactive login completed");
        Ok(account)
    }

    /// Terminate the session.
    ///
    /// The token record and the local session record are cleared first; a
    /// provider-side termination failure is surfaced as
    /// [`SessionError::Logout`] but never undoes the local reset. Calling
    /// `logout()` with no active session is a no-op success.
    pub async fn logout(&self) -> Result<(), SessionError> {
        if !self.state_tx.borrow().is_initialized {
            return Err(SessionError::NotInitialized);
        }

        self.tokens.clear().await?;
        self.state_tx.send_modify(|state| state.clear_account());

        self.provider
            .end_session()
            .await
            .map_err(SessionError::Logout)?;

        tracing::info!("Session terminated");
        Ok(())
    }
}
