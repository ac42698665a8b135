//! Google Drive store implementation.
//!
//! Uses Google Drive API v3 for metadata reads and partial updates.

use crate::config::DriveConfig;
use crate::error::{DriveError, DriveResult};
use crate::store::RemoteStore;
use async_trait::async_trait;
use drivesync_types::{EntityPatch, Field, FileId, RemoteEntity};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Scope needed to read and tag every file the user owns.
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// OAuth2 tokens.
#[derive(Debug, Clone)]
struct OAuthTokens {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<SystemTime>,
}

/// Tokens returned by the authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// Google Drive API response structures.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFileList {
    #[serde(default)]
    files: Vec<RemoteEntity>,
    next_page_token: Option<String>,
}

/// Google Drive store implementation.
pub struct GoogleDriveStore {
    config: DriveConfig,
    client: Client,
    tokens: Arc<RwLock<Option<OAuthTokens>>>,
}

impl GoogleDriveStore {
    /// Creates a new Google Drive store.
    pub fn new(config: DriveConfig) -> DriveResult<Self> {
        if config.page_size == 0 || config.page_size > 1000 {
            return Err(DriveError::Config(format!(
                "page_size must be between 1 and 1000, got {}",
                config.page_size
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DriveError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            client,
            tokens: Arc::new(RwLock::new(None)),
        })
    }

    /// Sets existing tokens (e.g., loaded from a config file).
    pub async fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let tokens = OAuthTokens {
            access_token,
            refresh_token,
            expires_at: None,
        };
        *self.tokens.write().await = Some(tokens);
    }

    /// Sets only a refresh token. The first request fetches an access token.
    pub async fn set_refresh_token(&self, refresh_token: String) {
        let tokens = OAuthTokens {
            access_token: String::new(),
            refresh_token: Some(refresh_token),
            expires_at: Some(UNIX_EPOCH),
        };
        *self.tokens.write().await = Some(tokens);
    }

    /// Returns whether any credentials are loaded.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Gets the OAuth2 authorization URL.
    pub fn auth_url(&self) -> String {
        format!(
            "{}/o/oauth2/v2/auth?\
            client_id={}&\
            redirect_uri={}&\
            response_type=code&\
            scope={}&\
            access_type=offline&\
            prompt=consent",
            self.config.auth_base_url,
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(DRIVE_SCOPE)
        )
    }

    /// Exchanges an authorization code for tokens and keeps them.
    pub async fn complete_auth(&self, auth_code: &str) -> DriveResult<TokenSet> {
        debug!("Exchanging auth code for tokens");

        let response = self
            .client
            .post(format!("{}/token", self.config.oauth_base_url))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", auth_code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| DriveError::Network(format!("token exchange failed: {e}")))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(DriveError::Auth(format!("token exchange failed: {error}")));
        }

        let token_set: TokenSet = response
            .json()
            .await
            .map_err(|e| DriveError::Auth(format!("failed to parse token response: {e}")))?;

        *self.tokens.write().await = Some(OAuthTokens {
            access_token: token_set.access_token.clone(),
            refresh_token: token_set.refresh_token.clone(),
            expires_at: expiry_from(token_set.expires_in),
        });
        info!("Google Drive authentication successful");

        Ok(token_set)
    }

    /// Gets the current access token, refreshing if needed.
    async fn access_token(&self) -> DriveResult<String> {
        let (access_token, expired) = {
            let guard = self.tokens.read().await;
            let tokens = guard
                .as_ref()
                .ok_or_else(|| DriveError::Auth("not authenticated".to_string()))?;

            let expired = tokens
                .expires_at
                .is_some_and(|exp| SystemTime::now() > exp);

            (tokens.access_token.clone(), expired)
        };

        if expired {
            return self.refresh_access_token().await;
        }

        Ok(access_token)
    }

    /// Refreshes the access token.
    async fn refresh_access_token(&self) -> DriveResult<String> {
        let refresh_token = self
            .tokens
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
            .ok_or_else(|| DriveError::Auth("no refresh token available".to_string()))?;

        debug!("Refreshing Google Drive access token");

        let response = self
            .client
            .post(format!("{}/token", self.config.oauth_base_url))
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| DriveError::Network(format!("token refresh failed: {e}")))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(DriveError::Auth(format!("token refresh failed: {error}")));
        }

        let token_set: TokenSet = response
            .json()
            .await
            .map_err(|e| DriveError::Auth(format!("failed to parse token response: {e}")))?;

        *self.tokens.write().await = Some(OAuthTokens {
            access_token: token_set.access_token.clone(),
            refresh_token: token_set.refresh_token.or(Some(refresh_token)),
            expires_at: expiry_from(token_set.expires_in),
        });

        Ok(token_set.access_token)
    }

    fn files_url(&self) -> String {
        format!("{}/drive/v3/files", self.config.api_base_url)
    }

    fn file_url(&self, id: &FileId) -> String {
        format!("{}/{}", self.files_url(), urlencoding::encode(id.as_str()))
    }
}

/// Expiry with a 60s buffer.
fn expiry_from(expires_in: Option<u64>) -> Option<SystemTime> {
    expires_in.map(|secs| SystemTime::now() + Duration::from_secs(secs.saturating_sub(60)))
}

/// Maps a non-success response to a typed error.
async fn check_status(response: Response, context: &str) -> DriveResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status.as_u16() {
        404 => DriveError::NotFound(context.to_string()),
        401 => DriveError::Auth(format!("{context}: {body}")),
        code => DriveError::Api {
            status: code,
            message: format!("{context}: {body}"),
        },
    })
}

#[async_trait]
impl RemoteStore for GoogleDriveStore {
    fn provider_name(&self) -> &'static str {
        "Google Drive"
    }

    async fn get(&self, id: &FileId, fields: &[Field]) -> DriveResult<RemoteEntity> {
        let access_token = self.access_token().await?;

        debug!(file_id = %id, "Fetching file");

        let response = self
            .client
            .get(self.file_url(id))
            .bearer_auth(&access_token)
            .query(&[("fields", Field::join(fields))])
            .send()
            .await
            .map_err(|e| DriveError::Network(format!("get file failed: {e}")))?;

        let response = check_status(response, &format!("file {id}")).await?;

        response
            .json()
            .await
            .map_err(|e| DriveError::Network(format!("failed to parse file {id}: {e}")))
    }

    async fn list_all(&self, query: &str, fields: &[Field]) -> DriveResult<Vec<RemoteEntity>> {
        let projection = format!("nextPageToken,files({})", Field::join(fields));
        let page_size = self.config.page_size.to_string();

        let mut all_files = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            // Long listings can outlive the token.
            let access_token = self.access_token().await?;
            let mut request = self
                .client
                .get(self.files_url())
                .bearer_auth(&access_token)
                .query(&[
                    ("q", query),
                    ("fields", projection.as_str()),
                    ("pageSize", page_size.as_str()),
                ]);

            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| DriveError::Network(format!("file list failed: {e}")))?;

            let response = check_status(response, "file list").await?;

            let file_list: DriveFileList = response
                .json()
                .await
                .map_err(|e| DriveError::Network(format!("failed to parse file list: {e}")))?;

            pages += 1;
            debug!(page = pages, count = file_list.files.len(), "Fetched listing page");
            all_files.extend(file_list.files);

            page_token = file_list.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        info!(files = all_files.len(), pages, "Listed Google Drive files");
        Ok(all_files)
    }

    async fn update(
        &self,
        id: &FileId,
        patch: &EntityPatch,
        fields: &[Field],
    ) -> DriveResult<RemoteEntity> {
        let access_token = self.access_token().await?;

        debug!(file_id = %id, "Updating file metadata");

        let response = self
            .client
            .patch(self.file_url(id))
            .bearer_auth(&access_token)
            .query(&[("fields", Field::join(fields))])
            .json(patch)
            .send()
            .await
            .map_err(|e| DriveError::Network(format!("update failed: {e}")))?;

        let response = check_status(response, &format!("file {id}")).await?;

        response
            .json()
            .await
            .map_err(|e| DriveError::Network(format!("failed to parse updated file {id}: {e}")))
    }
}
