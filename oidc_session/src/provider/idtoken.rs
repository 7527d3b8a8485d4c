use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HTTP_TIMEOUT;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Jwk {
    kty: String,
    kid: Option<String>,
    alg: Option<String>,
    n: Option<String>,
    e: Option<String>,
    x: Option<String>,
    y: Option<String>,
    crv: Option<String>,
}

/// Claims extracted from a verified ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    pub sub: String,
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
    /// Tenant/directory identifier, issued by multi-tenant providers.
    pub tid: Option<String>,
    pub nonce: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum TokenVerificationError {
    #[error("JWKS fetch failed: {0}")]
    JwksFetch(String),
    #[error("JWKS endpoint returned status: {0}")]
    JwksStatus(reqwest::StatusCode),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("No matching key found in JWKS")]
    NoMatchingKey,
    #[error("Missing key component: {0}")]
    MissingKeyComponent(String),
    #[error("Unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),
    #[error("Nonce mismatch")]
    NonceMismatch,
}

async fn fetch_jwks(
    http: &reqwest::Client,
    jwks_uri: &str,
) -> Result<Jwks, TokenVerificationError> {
    let response = http
        .get(jwks_uri)
        .timeout(HTTP_TIMEOUT)
        .send()
        .await
        .map_err(|e| TokenVerificationError::JwksFetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TokenVerificationError::JwksStatus(response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| TokenVerificationError::JwksFetch(e.to_string()))
}

fn find_key<'a>(jwks: &'a Jwks, kid: Option<&str>) -> Result<&'a Jwk, TokenVerificationError> {
    match kid {
        Some(kid) => jwks
            .keys
            .iter()
            .find(|key| key.kid.as_deref() == Some(kid))
            .ok_or(TokenVerificationError::NoMatchingKey),
        // No kid in the header is only unambiguous with a single published key
        None if jwks.keys.len() == 1 => Ok(&jwks.keys[0]),
        None => Err(TokenVerificationError::NoMatchingKey),
    }
}

fn decoding_key(jwk: &Jwk, alg: Algorithm) -> Result<DecodingKey, TokenVerificationError> {
    let component = |value: &Option<String>, name: &str| {
        value
            .clone()
            .ok_or_else(|| TokenVerificationError::MissingKeyComponent(name.to_string()))
    };

    match alg {
        Algorithm::RS256 => {
            let n = component(&jwk.n, "n")?;
            let e = component(&jwk.e, "e")?;
            Ok(DecodingKey::from_rsa_components(&n, &e)?)
        }
        Algorithm::ES256 => {
            let x = component(&jwk.x, "x")?;
            let y = component(&jwk.y, "y")?;
            Ok(DecodingKey::from_ec_components(&x, &y)?)
        }
        other => Err(TokenVerificationError::UnsupportedAlgorithm(other)),
    }
}

/// Verify an ID token against the provider JWKS and extract its claims.
///
/// Checks signature, issuer, audience and expiry (via `jsonwebtoken`
/// validation) plus the login nonce.
pub(super) async fn verify_id_token(
    http: &reqwest::Client,
    jwks_uri: &str,
    id_token: &str,
    client_id: &str,
    expected_issuer: &str,
    expected_nonce: &str,
) -> Result<IdTokenClaims, TokenVerificationError> {
    let header = decode_header(id_token)?;

    let jwks = fetch_jwks(http, jwks_uri).await?;
    let jwk = find_key(&jwks, header.kid.as_deref())?;
    let key = decoding_key(jwk, header.alg)?;

    let mut validation = Validation::new(header.alg);
    validation.set_audience(&[client_id]);
    validation.set_issuer(&[expected_issuer]);

    let data = decode::<IdTokenClaims>(id_token, &key, &validation)?;
    let claims = data.claims;

    if claims.nonce.as_deref() != Some(expected_nonce) {
        tracing::error!("Nonce mismatch in verified id token");
        return Err(TokenVerificationError::NonceMismatch);
    }

    Ok(claims)
}
