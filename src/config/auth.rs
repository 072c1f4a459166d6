//! Login credentials

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials used to open a session
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Filelocker user id
    #[serde(default)]
    pub login: String,

    /// CLI API key issued by Filelocker
    #[serde(default)]
    pub api_key: String,
}

impl AuthConfig {
    /// Check if both the login and the API key are set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.login.is_empty() && !self.api_key.is_empty()
    }

    /// Overlay non-empty fields from `other`
    pub fn merge(&mut self, other: &Self) {
        if !other.login.is_empty() {
            self.login.clone_from(&other.login);
        }
        if !other.api_key.is_empty() {
            self.api_key.clone_from(&other.api_key);
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("login", &self.login)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}
