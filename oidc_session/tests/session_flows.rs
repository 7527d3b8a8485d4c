//! End-to-end session lifecycle tests against the public API, driven through
//! a scripted identity provider.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use oidc_session::{
    AccountInfo, AuthorizationError, IdentityProvider, InMemoryStore, ProviderError,
    RouteDecision, RouteGuard, SessionError, SessionManager, TokenStore, evaluate,
};

fn account(id: &str, token: &str) -> AccountInfo {
    AccountInfo {
        account_id: id.to_string(),
        display_name: format!("User {id}"),
        tenant_id: Some("tenant-9".to_string()),
        id_token: token.to_string(),
        issued_at: Utc::now(),
    }
}

#[derive(Default)]
struct ScriptedProvider {
    cached: Vec<AccountInfo>,
    startup_calls: AtomicUsize,
    login_results: Mutex<Vec<Result<AccountInfo, ProviderError>>>,
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn startup(&self) -> Result<(), ProviderError> {
        self.startup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn cached_accounts(&self) -> Result<Vec<AccountInfo>, ProviderError> {
        Ok(self.cached.clone())
    }

    async fn interactive_login(&self) -> Result<AccountInfo, ProviderError> {
        self.login_results
            .lock()
            .await
            .pop()
            .expect("no scripted login outcome left")
    }

    async fn end_session(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

fn session_with(provider: ScriptedProvider) -> (Arc<SessionManager>, Arc<InMemoryStore>) {
    let backend = Arc::new(InMemoryStore::new());
    let tokens = TokenStore::new(backend.clone());
    (
        Arc::new(SessionManager::new(Arc::new(provider), tokens)),
        backend,
    )
}

#[tokio::test]
async fn init_with_no_cached_accounts_yields_unauthenticated_session() {
    // Scenario A
    let (manager, _) = session_with(ScriptedProvider::default());

    let snapshot = manager.init().await;

    assert!(snapshot.is_initialized);
    assert!(!snapshot.is_authenticated);
    assert!(snapshot.account.is_none());
}

#[tokio::test]
async fn init_with_cached_account_restores_it() {
    // Scenario B
    let provider = ScriptedProvider {
        cached: vec![account("acct-1", "tok-1")],
        ..Default::default()
    };
    let (manager, _) = session_with(provider);

    let snapshot = manager.init().await;

    assert!(snapshot.is_initialized);
    assert!(snapshot.is_authenticated);
    assert_eq!(snapshot.account.unwrap().account_id, "acct-1");
}

#[tokio::test]
async fn login_after_init_authenticates_and_persists_token() {
    // Scenario C
    let provider = ScriptedProvider {
        login_results: Mutex::new(vec![Ok(account("acct-2", "tok-xyz"))]),
        ..Default::default()
    };
    let (manager, backend) = session_with(provider);
    manager.init().await;

    let logged_in = manager.login().await.unwrap();

    assert_eq!(logged_in.account_id, "acct-2");
    let snapshot = manager.state();
    assert!(snapshot.is_authenticated);
    assert_eq!(snapshot.account.unwrap().account_id, "acct-2");

    let tokens = TokenStore::new(backend);
    assert_eq!(tokens.get().await.unwrap().as_deref(), Some("tok-xyz"));
}

#[tokio::test]
async fn canceled_login_leaves_session_untouched() {
    // Scenario D
    let provider = ScriptedProvider {
        login_results: Mutex::new(vec![Err(ProviderError::Authorization(
            AuthorizationError::Canceled,
        ))]),
        ..Default::default()
    };
    let (manager, backend) = session_with(provider);
    manager.init().await;
    let before = manager.state();

    let result = manager.login().await;

    assert!(matches!(result, Err(SessionError::Login(_))));
    assert_eq!(manager.state(), before);
    let tokens = TokenStore::new(backend);
    assert!(tokens.get().await.unwrap().is_none());
}

#[tokio::test]
async fn logout_clears_everything_and_repeats_cleanly() {
    // Scenario E
    let provider = ScriptedProvider {
        login_results: Mutex::new(vec![Ok(account("acct-2", "tok-xyz"))]),
        ..Default::default()
    };
    let (manager, backend) = session_with(provider);
    manager.init().await;
    manager.login().await.unwrap();

    manager.logout().await.unwrap();

    let snapshot = manager.state();
    assert!(snapshot.is_initialized);
    assert!(!snapshot.is_authenticated);
    assert!(snapshot.account.is_none());
    let tokens = TokenStore::new(backend);
    assert!(tokens.get().await.unwrap().is_none());

    // A repeated logout is a no-op success
    assert!(manager.logout().await.is_ok());
}

#[tokio::test]
async fn flows_before_init_fail_fast() {
    let provider = ScriptedProvider {
        login_results: Mutex::new(vec![Ok(account("acct-2", "tok-xyz"))]),
        ..Default::default()
    };
    let (manager, backend) = session_with(provider);

    assert!(matches!(
        manager.login().await,
        Err(SessionError::NotInitialized)
    ));
    assert!(matches!(
        manager.logout().await,
        Err(SessionError::NotInitialized)
    ));

    // Nothing moved
    let snapshot = manager.state();
    assert!(!snapshot.is_initialized);
    assert!(!snapshot.is_authenticated);
    let tokens = TokenStore::new(backend);
    assert!(tokens.get().await.unwrap().is_none());
}

#[tokio::test]
async fn concurrent_init_runs_exactly_one_handshake() {
    let provider = ScriptedProvider {
        cached: vec![account("acct-1", "tok-1")],
        ..Default::default()
    };
    let provider = Arc::new(provider);
    let backend = Arc::new(InMemoryStore::new());
    let manager = Arc::new(SessionManager::new(
        provider.clone(),
        TokenStore::new(backend),
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let manager = manager.clone();
        handles.push(tokio::spawn(async move { manager.init().await }));
    }
    for handle in handles {
        let snapshot = handle.await.unwrap();
        assert!(snapshot.is_initialized);
        assert_eq!(
            snapshot.account.as_ref().map(|a| a.account_id.as_str()),
            Some("acct-1")
        );
    }

    assert_eq!(provider.startup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn route_guard_follows_the_session_lifecycle() {
    let provider = ScriptedProvider {
        login_results: Mutex::new(vec![Ok(account("acct-2", "tok-xyz"))]),
        ..Default::default()
    };
    let (manager, _) = session_with(provider);

    // Before init the guard holds
    let mut guard = RouteGuard::new(manager.subscribe());
    assert_eq!(guard.decision(), RouteDecision::Hold);

    // After init with no cached account it routes to sign-in
    manager.init().await;
    let ready = guard.wait_initialized().await;
    assert_eq!(evaluate(&ready), RouteDecision::SignIn);

    // After a login it routes to the dashboard
    manager.login().await.unwrap();
    assert_eq!(guard.decision(), RouteDecision::Dashboard);

    // And logout sends the user back to sign-in, still initialized
    manager.logout().await.unwrap();
    assert_eq!(guard.decision(), RouteDecision::SignIn);
}

#[tokio::test]
async fn session_invariant_holds_across_the_lifecycle() {
    // For every reachable state: is_authenticated == account.is_some()
    let provider = ScriptedProvider {
        cached: vec![account("acct-1", "tok-1")],
        login_results: Mutex::new(vec![Ok(account("acct-2", "tok-xyz"))]),
        ..Default::default()
    };
    let (manager, _) = session_with(provider);

    let check = |snapshot: &oidc_session::SessionSnapshot| {
        assert_eq!(snapshot.is_authenticated, snapshot.account.is_some());
    };

    check(&manager.state());
    check(&manager.init().await);
    manager.login().await.unwrap();
    check(&manager.state());
    manager.logout().await.unwrap();
    check(&manager.state());
}
