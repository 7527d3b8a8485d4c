use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::store::StorageBackend;
use crate::utils::{base64url_encode, gen_random_string};

use super::HTTP_TIMEOUT;
use super::accounts::AccountCache;
use super::broker::{AuthorizationBroker, AuthorizationRequest};
use super::config::ProviderConfig;
use super::discovery::{DiscoveryDocument, fetch_discovery};
use super::errors::ProviderError;
use super::idtoken::{IdTokenClaims, verify_id_token};
use super::types::{AccountInfo, IdentityProvider, TokenResponse};

/// Production identity-provider client.
///
/// Endpoint discovery runs once per instance and is shared by concurrent
/// callers; the interactive step is delegated to the injected
/// [`AuthorizationBroker`].
pub struct OidcProvider {
    config: ProviderConfig,
    http: reqwest::Client,
    endpoints: OnceCell<DiscoveryDocument>,
    broker: Arc<dyn AuthorizationBroker>,
    accounts: AccountCache,
}

impl OidcProvider {
    pub fn new(
        config: ProviderConfig,
        broker: Arc<dyn AuthorizationBroker>,
        backend: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            endpoints: OnceCell::new(),
            broker,
            accounts: AccountCache::new(backend),
        }
    }

    async fn endpoints(&self) -> Result<&DiscoveryDocument, ProviderError> {
        self.endpoints
            .get_or_try_init(|| async {
                Ok::<_, ProviderError>(fetch_discovery(&self.http, &self.config.issuer_url).await?)
            })
            .await
    }

    fn build_authorization_url(
        &self,
        authorization_endpoint: &str,
        state: &str,
        nonce: &str,
        code_challenge: &str,
    ) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}\
            &state={}&nonce={}&code_challenge={}&code_challenge_method=S256",
            authorization_endpoint,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(&self.config.scope_param()),
            state,
            nonce,
            code_challenge,
        )
    }

    async fn exchange_code(
        &self,
        token_endpoint: &str,
        code: String,
        code_verifier: String,
    ) -> Result<TokenResponse, ProviderError> {
        let mut form = vec![
            ("grant_type", "authorization_code".to_string()),
            ("code", code),
            ("client_id", self.config.client_id.clone()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("code_verifier", code_verifier),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.clone()));
        }

        let response = self
            .http
            .post(token_endpoint)
            .timeout(HTTP_TIMEOUT)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::TokenExchange(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {}
            status => {
                tracing::error!("Token exchange failed with status: {}", status);
                return Err(ProviderError::TokenExchange(status.to_string()));
            }
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ProviderError::TokenExchange(e.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn preload_endpoints(&self, document: DiscoveryDocument) {
        self.endpoints
            .set(document)
            .expect("endpoints already loaded");
    }
}

fn account_from_claims(claims: IdTokenClaims, id_token: String) -> AccountInfo {
    let display_name = claims
        .name
        .or(claims.preferred_username)
        .or(claims.email)
        .unwrap_or_else(|| claims.sub.clone());

    AccountInfo {
        account_id: claims.sub,
        display_name,
        tenant_id: claims.tid,
        id_token,
        issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_else(Utc::now),
    }
}

#[async_trait]
impl IdentityProvider for OidcProvider {
    async fn startup(&self) -> Result<(), ProviderError> {
        let endpoints = self.endpoints().await?;
        tracing::debug!(
            "Provider ready, authorization endpoint: {}",
            endpoints.authorization_endpoint
        );
        Ok(())
    }

    async fn cached_accounts(&self) -> Result<Vec<AccountInfo>, ProviderError> {
        self.accounts.load().await
    }

    async fn interactive_login(&self) -> Result<AccountInfo, ProviderError> {
        let endpoints = self.endpoints().await?;

        let state = gen_random_string(32)?;
        let nonce = gen_random_string(32)?;
        let code_verifier = gen_random_string(32)?;
        let code_challenge = base64url_encode(Sha256::digest(code_verifier.as_bytes()).to_vec());

        let request = AuthorizationRequest {
            authorization_url: self.build_authorization_url(
                &endpoints.authorization_endpoint,
                &state,
                &nonce,
                &code_challenge,
            ),
            state: state.clone(),
        };

        let reply = self.broker.authorize(request).await?;

        if reply.state != state {
            tracing::error!("State mismatch in authorization reply");
            return Err(ProviderError::StateMismatch);
        }

        let tokens = self
            .exchange_code(&endpoints.token_endpoint, reply.code, code_verifier)
            .await?;
        let id_token = tokens.id_token.ok_or_else(|| {
            ProviderError::TokenExchange("ID token not present in response".to_string())
        })?;

        let claims = verify_id_token(
            &self.http,
            &endpoints.jwks_uri,
            &id_token,
            &self.config.client_id,
            &endpoints.issuer,
            &nonce,
        )
        .await?;

        let account = account_from_claims(claims, id_token);
        self.accounts.remember(&account).await?;

        tracing::info!(account_id = %account.account_id, "interactive authorization completed");
        Ok(account)
    }

    async fn end_session(&self) -> Result<(), ProviderError> {
        self.accounts.clear().await?;

        // Discovery may never have run (startup swallowed a failure); local
        // cleanup above is still the authoritative part of logout.
        let Some(endpoints) = self.endpoints.get() else {
            return Ok(());
        };
        let Some(end_session) = &endpoints.end_session_endpoint else {
            return Ok(());
        };

        let response = self
            .http
            .get(end_session)
            .timeout(HTTP_TIMEOUT)
            .send()
            .await
            .map_err(|e| ProviderError::EndSession(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::EndSession(response.status().to_string()));
        }

        tracing::debug!("Provider session terminated");
        Ok(())
    }
}
