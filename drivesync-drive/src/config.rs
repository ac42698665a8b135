//! Google Drive client configuration.

use serde::{Deserialize, Serialize};

/// Google Drive specific configuration.
///
/// Every field has a default so partial config files deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// OAuth2 client ID.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Redirect URI for OAuth flow.
    pub redirect_uri: String,
    /// Base URL for Google Drive API (e.g. `https://www.googleapis.com`).
    pub api_base_url: String,
    /// Base URL for Google OAuth2 (e.g. `https://oauth2.googleapis.com`).
    pub oauth_base_url: String,
    /// Base URL for Google Accounts auth page (e.g. `https://accounts.google.com`).
    pub auth_base_url: String,
    /// Files per listing page. The API caps this at 1000.
    pub page_size: u32,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
            api_base_url: "https://www.googleapis.com".to_string(),
            oauth_base_url: "https://oauth2.googleapis.com".to_string(),
            auth_base_url: "https://accounts.google.com".to_string(),
            page_size: 1000,
            timeout_secs: 60,
        }
    }
}
