//! Session handling
//!
//! The backend issues a token on `admin/login`. The token lives in a shared
//! [`Session`] that the HTTP transport reads before every request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Shared, cloneable holder for the current session token
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Current token, if logged in
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().await;
        *guard = Some(token.into());
        tracing::debug!("Session token updated");
    }

    pub async fn clear(&self) {
        let mut guard = self.token.write().await;
        *guard = None;
        tracing::debug!("Session token cleared");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

/// Pull the session token out of a login payload.
///
/// The backend either returns the token as the bare payload or as a
/// `token` field of an admin object.
pub fn session_token(data: &Value) -> Option<String> {
    match data {
        Value::String(token) if !token.is_empty() => Some(token.clone()),
        Value::Object(map) => map
            .get("token")
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        _ => None,
    }
}
