use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HTTP_TIMEOUT;

/// Provider metadata per OpenID Connect Discovery 1.0, fetched once at
/// startup and held for the client's lifetime.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub jwks_uri: String,
    pub userinfo_endpoint: Option<String>,
    /// RP-initiated logout endpoint, when the provider supports it
    pub end_session_endpoint: Option<String>,
    pub scopes_supported: Option<Vec<String>>,
    pub response_types_supported: Option<Vec<String>>,
}

/// Errors that can occur during OIDC discovery
#[derive(Error, Debug, Clone)]
pub enum DiscoveryError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),
    #[error("HTTP status error: {0}")]
    HttpStatusError(reqwest::StatusCode),
    #[error("JSON parsing failed: {0}")]
    JsonError(String),
    #[error("Issuer mismatch: discovered={0}, expected={1}")]
    IssuerMismatch(String, String),
}

impl From<reqwest::Error> for DiscoveryError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

/// Fetch the discovery document from `{issuer}/.well-known/openid-configuration`.
///
/// The issuer embedded in the document must match the configured issuer; a
/// mismatch is rejected per the OIDC Discovery specification.
pub(super) async fn fetch_discovery(
    http: &reqwest::Client,
    issuer_url: &str,
) -> Result<DiscoveryDocument, DiscoveryError> {
    let issuer_url = issuer_url.trim_end_matches('/');
    let discovery_url = format!("{issuer_url}/.well-known/openid-configuration");

    tracing::debug!("Fetching OIDC discovery from: {}", discovery_url);

    let response = http
        .get(&discovery_url)
        .timeout(HTTP_TIMEOUT)
        .send()
        .await?;

    if !response.status().is_success() {
        tracing::error!("OIDC discovery failed with status: {}", response.status());
        return Err(DiscoveryError::HttpStatusError(response.status()));
    }

    let document: DiscoveryDocument = response
        .json()
        .await
        .map_err(|e| DiscoveryError::JsonError(e.to_string()))?;

    if document.issuer != issuer_url {
        tracing::error!(
            "Discovery document issuer {} does not match configured issuer {}",
            document.issuer,
            issuer_url
        );
        return Err(DiscoveryError::IssuerMismatch(
            document.issuer,
            issuer_url.to_string(),
        ));
    }

    tracing::debug!(
        "Discovered endpoints: authorization={}, token={}, jwks={}",
        document.authorization_endpoint,
        document.token_endpoint,
        document.jwks_uri
    );

    Ok(document)
}
