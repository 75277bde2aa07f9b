//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Name of the cookie carrying the access token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie is marked `Secure`.
    #[serde(default)]
    pub cookie_secure: bool,
    /// Admin account created at startup when no user has its email.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the startup admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Display name.
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            bootstrap_admin: None,
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    60 * 24
}

fn default_cookie_name() -> String {
    "access_token".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}
