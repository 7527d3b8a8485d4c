use std::{env, sync::LazyLock};

/// Issuer URL of the identity provider, used for endpoint discovery.
static AUTH_ISSUER_URL: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_ISSUER_URL").expect("AUTH_ISSUER_URL must be set"));

static AUTH_CLIENT_ID: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_CLIENT_ID").expect("AUTH_CLIENT_ID must be set"));

/// Optional confidential-client secret. Interactive clients are usually
/// public clients and leave this unset; PKCE protects the code exchange.
static AUTH_CLIENT_SECRET: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("AUTH_CLIENT_SECRET").ok());

static AUTH_REDIRECT_URI: LazyLock<String> =
    LazyLock::new(|| env::var("AUTH_REDIRECT_URI").expect("AUTH_REDIRECT_URI must be set"));

static AUTH_SCOPES: LazyLock<String> = LazyLock::new(|| {
    env::var("AUTH_SCOPES").unwrap_or_else(|_| "openid profile user.read".to_string())
});

/// Fixed provider configuration, resolved once at client construction and
/// never renegotiated at runtime.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub issuer_url: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            issuer_url: AUTH_ISSUER_URL.clone(),
            client_id: AUTH_CLIENT_ID.clone(),
            client_secret: AUTH_CLIENT_SECRET.clone(),
            redirect_uri: AUTH_REDIRECT_URI.clone(),
            scopes: AUTH_SCOPES
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    pub(crate) fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}
