//! Client configuration.
//!
//! Values come from serde (for hosts that load a file) or from the
//! environment. Unset variables fall back to the defaults.

use serde::Deserialize;

pub const DEFAULT_LOGIN_PATH: &str = "/login/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix joined onto every request path. Empty means relative paths.
    pub base_url: String,
    /// Where a successful logout navigates to, relative to `base_url`.
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Reads `TODO_BASE_URL` and `TODO_LOGIN_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("TODO_BASE_URL").unwrap_or(defaults.base_url),
            login_path: lookup("TODO_LOGIN_PATH").unwrap_or(defaults.login_path),
        }
    }

    /// Absolute (or base-relative) URL of the login surface.
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.login_path)
    }
}
