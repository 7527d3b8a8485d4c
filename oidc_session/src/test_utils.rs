//! Shared test initialization.
//!
//! Loads `.env_test` (falling back to `.env`) once per test binary and fills
//! in the provider configuration the env-backed statics require, so tests
//! never depend on the developer's shell environment.

use std::sync::Once;

pub fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        let defaults = [
            ("AUTH_ISSUER_URL", "https://login.example.test"),
            ("AUTH_CLIENT_ID", "dashboard-client"),
            ("AUTH_REDIRECT_URI", "https://localhost:3000/auth/redirect"),
        ];
        for (key, value) in defaults {
            if std::env::var(key).is_err() {
                unsafe {
                    std::env::set_var(key, value);
                }
            }
        }
    });
}
