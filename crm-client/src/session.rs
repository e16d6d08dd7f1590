// crm-client/src/session.rs
// 会话管理 - 令牌交换 + JSON 文件存储

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::client::{TokenErrorResponse, TokenResponse};

use crate::config::{AuthConfig, ClientConfig};
use crate::error::{ClientError, ClientResult};

/// Token endpoint path on the platform.
const TOKEN_PATH: &str = "/api/auc/oauth2/token";

/// An authenticated session: the bearer token and the username it was
/// issued for. Absence of a session is the anonymous state, never an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// 会话存储
///
/// One JSON file per storage directory; token and username are saved
/// and cleared together.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let path = base_path.into().join("session.json");
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 保存会话
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// 加载会话
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 删除会话
    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Owns the session lifecycle: password-grant login, logout, restore.
///
/// The gateway never reaches into storage on its own; it receives the
/// session explicitly at construction.
#[derive(Debug, Clone)]
pub struct SessionManager {
    http: reqwest::Client,
    base_url: String,
    auth: AuthConfig,
    timeout_ms: u64,
    storage: SessionStorage,
}

impl SessionManager {
    pub fn new(config: &ClientConfig, storage: SessionStorage) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth: config.auth.clone(),
            timeout_ms: config.timeout_ms,
            storage,
        })
    }

    /// Exchange credentials for a bearer token and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let password = format!("{}{}", password, self.auth.security_token);
        let params = [
            ("grant_type", "password"),
            ("client_id", self.auth.client_id.as_str()),
            ("client_secret", self.auth.client_secret.as_str()),
            ("username", username),
            ("password", password.as_str()),
        ];

        tracing::debug!(url = %url, username, "requesting access token");
        let response = self
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|err| ClientError::transport(err, self.timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::transport(err, self.timeout_ms))?;
        if !status.is_success() {
            let description = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|err| {
                    if err.error_description.is_empty() {
                        err.error
                    } else {
                        err.error_description
                    }
                })
                .unwrap_or(body);
            return Err(ClientError::Auth(description));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let session = Session {
            token: token.access_token,
            username: username.to_string(),
        };
        self.storage.save(&session)?;
        tracing::info!(username, "logged in");
        Ok(session)
    }

    /// Drop the persisted session.
    pub fn logout(&self) -> ClientResult<()> {
        self.storage.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The persisted session, if any.
    pub fn current(&self) -> Option<Session> {
        self.storage.load()
    }

    /// True iff a token is present. Token expiry is not validated here;
    /// an expired token surfaces as a 401 on the next gateway call.
    pub fn is_active(&self) -> bool {
        self.storage.exists() && self.storage.load().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(dir.path());
        assert!(!storage.exists());
        assert!(storage.load().is_none());

        let session = Session {
            token: "test-token".into(),
            username: "alice".into(),
        };
        storage.save(&session).unwrap();
        assert!(storage.exists());
        assert_eq!(storage.load(), Some(session));

        storage.clear().unwrap();
        assert!(!storage.exists());
        assert!(storage.load().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(dir.path());
        storage.clear().unwrap();
        storage.clear().unwrap();
    }

    #[test]
    fn storage_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let storage = SessionStorage::new(dir.path().join("nested").join("profile"));
        storage
            .save(&Session {
                token: "t".into(),
                username: "u".into(),
            })
            .unwrap();
        assert!(storage.exists());
    }
}
