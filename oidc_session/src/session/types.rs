use serde::{Deserialize, Serialize};

use crate::provider::AccountInfo;

/// The session record consumers observe.
///
/// Invariant: `is_authenticated == account.is_some()`, maintained by the
/// mutation helpers below. `is_initialized` transitions false→true exactly
/// once per process lifetime and never reverts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub is_initialized: bool,
    pub is_authenticated: bool,
    pub account: Option<AccountInfo>,
}

impl SessionSnapshot {
    /// The state at process start: uninitialized, unauthenticated.
    pub fn initial() -> Self {
        Self {
            is_initialized: false,
            is_authenticated: false,
            account: None,
        }
    }

    pub(crate) fn set_account(&mut self, account: AccountInfo) {
        self.is_authenticated = true;
        self.account = Some(account);
    }

    pub(crate) fn clear_account(&mut self) {
        self.is_authenticated = false;
        self.account = None;
    }
}
